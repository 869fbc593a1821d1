//! Unit tests for hn-registry.

#[cfg(test)]
mod create {
    use hn_core::{CapabilitySet, Coord, NodeId, Rat};

    use crate::{NodeKind, NodeRegistry, RegistryError};

    #[test]
    fn ids_are_sequential() {
        let mut reg = NodeRegistry::new();
        let a = reg.create_node(NodeKind::Terminal, CapabilitySet::multi_connectivity()).unwrap();
        let b = reg.create_node(NodeKind::Cell, CapabilitySet::single(Rat::Lte)).unwrap();
        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn new_nodes_start_at_origin() {
        let mut reg = NodeRegistry::new();
        let a = reg.create_node(NodeKind::Terminal, CapabilitySet::multi_connectivity()).unwrap();
        assert_eq!(reg.position(a).unwrap(), Coord::ORIGIN);
    }

    #[test]
    fn capacity_exceeded() {
        let mut reg = NodeRegistry::with_limit(2);
        let caps = CapabilitySet::single(Rat::MmWave);
        reg.create_node(NodeKind::Cell, caps).unwrap();
        reg.create_node(NodeKind::Cell, caps).unwrap();
        let err = reg.create_node(NodeKind::Cell, caps).unwrap_err();
        assert_eq!(err, RegistryError::CapacityExceeded { limit: 2 });
        assert_eq!(reg.len(), 2, "failed create must not grow the registry");
    }

    #[test]
    fn zero_limit_rejects_everything() {
        let mut reg = NodeRegistry::with_limit(0);
        assert!(reg.create_node(NodeKind::Terminal, CapabilitySet::multi_connectivity()).is_err());
        assert!(reg.is_empty());
    }
}

#[cfg(test)]
mod lookup {
    use hn_core::{CapabilitySet, Coord, NodeId, Rat};

    use crate::{NodeKind, NodeRegistry, RegistryError};

    #[test]
    fn set_and_get_position() {
        let mut reg = NodeRegistry::new();
        let a = reg.create_node(NodeKind::Terminal, CapabilitySet::multi_connectivity()).unwrap();
        reg.set_position(a, Coord::new(12.0, 34.0)).unwrap();
        assert_eq!(reg.position(a).unwrap(), Coord::new(12.0, 34.0));
        assert_eq!(reg.positions()[a.index()], Coord::new(12.0, 34.0));
    }

    #[test]
    fn unknown_node() {
        let mut reg = NodeRegistry::new();
        assert_eq!(reg.position(NodeId(3)), Err(RegistryError::UnknownNode(NodeId(3))));
        assert!(reg.set_position(NodeId::INVALID, Coord::ORIGIN).is_err());
        assert!(reg.kind(NodeId(0)).is_err());
    }

    #[test]
    fn kind_and_capabilities() {
        let mut reg = NodeRegistry::new();
        let c = reg.create_node(NodeKind::Cell, CapabilitySet::single(Rat::Lte)).unwrap();
        assert_eq!(reg.kind(c).unwrap(), NodeKind::Cell);
        assert!(reg.capabilities(c).unwrap().supports(Rat::Lte));
    }
}

#[cfg(test)]
mod listing {
    use hn_core::{Capability, CapabilitySet, NodeId, Rat};

    use crate::{NodeKind, NodeRegistry};

    fn mixed() -> NodeRegistry {
        let mut reg = NodeRegistry::new();
        reg.create_node(NodeKind::Terminal, CapabilitySet::multi_connectivity()).unwrap(); // 0
        reg.create_node(NodeKind::Cell, CapabilitySet::single(Rat::MmWave)).unwrap();      // 1
        reg.create_node(NodeKind::Cell, CapabilitySet::single(Rat::Lte)).unwrap();         // 2
        reg.create_node(NodeKind::Terminal, CapabilitySet::single(Rat::Lte)).unwrap();     // 3
        reg
    }

    #[test]
    fn by_capability() {
        let reg = mixed();
        let lte: Vec<_> = reg.list_by_capability(Capability::Lte).collect();
        assert_eq!(lte, [NodeId(0), NodeId(2), NodeId(3)]);
        let mc: Vec<_> = reg.list_by_capability(Capability::MultiConnectivity).collect();
        assert_eq!(mc, [NodeId(0)]);
    }

    #[test]
    fn by_kind() {
        let reg = mixed();
        let terminals: Vec<_> = reg.list_by_kind(NodeKind::Terminal).collect();
        assert_eq!(terminals, [NodeId(0), NodeId(3)]);
    }

    #[test]
    fn listing_is_restartable() {
        let reg = mixed();
        let mut it = reg.list_by_capability(Capability::MmWave);
        assert_eq!(it.next(), Some(NodeId(0)));
        assert_eq!(it.next(), Some(NodeId(1)));
        assert_eq!(it.next(), None);
        let again: Vec<_> = it.restart().collect();
        assert_eq!(again, [NodeId(0), NodeId(1)]);
    }

    #[test]
    fn clone_is_independent() {
        let reg = mixed();
        let mut it = reg.list_by_kind(NodeKind::Cell);
        let copy = it.clone();
        it.next();
        assert_eq!(copy.count(), 2);
        assert_eq!(it.count(), 1);
    }
}
