//! Unit tests for hn-mobility.

#[cfg(test)]
mod placement {
    use hn_core::{Bounds, Coord, SimRng};

    use crate::{FixedPositions, MobilityError, PositionAllocator, RandomRectangle};

    #[test]
    fn random_rectangle_stays_in_bounds() {
        let bounds = Bounds::from_max(4_000.0, 4_000.0);
        let mut alloc = RandomRectangle::new(bounds, SimRng::new(7));
        for _ in 0..1_000 {
            let p = alloc.allocate().unwrap();
            assert!(bounds.contains(p), "{p} outside area");
        }
    }

    #[test]
    fn random_rectangle_is_seeded() {
        let bounds = Bounds::from_max(100.0, 100.0);
        let mut a = RandomRectangle::new(bounds, SimRng::new(3));
        let mut b = RandomRectangle::new(bounds, SimRng::new(3));
        for _ in 0..20 {
            assert_eq!(a.allocate().unwrap(), b.allocate().unwrap());
        }
    }

    #[test]
    fn fixed_positions_in_order_then_exhausted() {
        let mut alloc = FixedPositions::new(vec![Coord::new(1.0, 2.0), Coord::new(3.0, 4.0)]);
        assert_eq!(alloc.allocate().unwrap(), Coord::new(1.0, 2.0));
        assert_eq!(alloc.remaining(), 1);
        assert_eq!(alloc.allocate().unwrap(), Coord::new(3.0, 4.0));
        assert!(matches!(
            alloc.allocate(),
            Err(MobilityError::AllocatorExhausted { allocated: 2 })
        ));
    }
}

#[cfg(test)]
mod model {
    use hn_core::{Bounds, Coord, NodeId, NodeRng};

    use crate::{ConstantPosition, MobilityModel, RandomWalk2d};

    #[test]
    fn constant_position_never_moves() {
        let mut rng = NodeRng::new(1, NodeId(0));
        let p = Coord::new(5.0, 6.0);
        assert_eq!(ConstantPosition.step(p, 100.0, &mut rng), p);
    }

    #[test]
    fn walk_distance_bounded_by_max_speed() {
        let walk = RandomWalk2d::new(Bounds::from_max(10_000.0, 10_000.0), 2.0, 4.0, 1.0);
        let mut rng = NodeRng::new(5, NodeId(0));
        let start = Coord::new(5_000.0, 5_000.0);
        let end = walk.step(start, 1.0, &mut rng);
        let d = start.distance(end);
        assert!((2.0 - 1e-9..=4.0 + 1e-9).contains(&d), "one leg moved {d} m");
    }

    #[test]
    fn walk_stays_inside_small_area() {
        let bounds = Bounds::from_max(5.0, 5.0);
        let walk = RandomWalk2d::new(bounds, 2.0, 4.0, 1.0);
        let mut rng = NodeRng::new(11, NodeId(2));
        let mut p = Coord::new(2.5, 2.5);
        for _ in 0..500 {
            p = walk.step(p, 1.0, &mut rng);
            assert!(bounds.contains(p), "{p} escaped");
        }
    }

    #[test]
    fn walk_is_reproducible() {
        let walk = RandomWalk2d::new(Bounds::default(), 2.0, 4.0, 1.0);
        let mut a = NodeRng::new(9, NodeId(4));
        let mut b = NodeRng::new(9, NodeId(4));
        let p = Coord::new(100.0, 100.0);
        assert_eq!(walk.step(p, 10.0, &mut a), walk.step(p, 10.0, &mut b));
    }

    #[test]
    fn fixed_speed_walk() {
        let walk = RandomWalk2d::new(Bounds::from_max(1_000.0, 1_000.0), 3.0, 3.0, 1.0);
        let mut rng = NodeRng::new(0, NodeId(0));
        let start = Coord::new(500.0, 500.0);
        let d = start.distance(walk.step(start, 0.5, &mut rng));
        assert!((d - 1.5).abs() < 1e-9, "half-second leg at 3 m/s moved {d}");
    }
}

#[cfg(test)]
mod engine {
    use hn_core::{Bounds, CapabilitySet, Coord, Rat};
    use hn_registry::{NodeKind, NodeRegistry};

    use crate::{ConstantPosition, MobilityEngine, RandomWalk2d};

    fn registry() -> NodeRegistry {
        let mut reg = NodeRegistry::new();
        let t = reg.create_node(NodeKind::Terminal, CapabilitySet::multi_connectivity()).unwrap();
        let c = reg.create_node(NodeKind::Cell, CapabilitySet::single(Rat::Lte)).unwrap();
        reg.set_position(t, Coord::new(500.0, 500.0)).unwrap();
        reg.set_position(c, Coord::new(100.0, 100.0)).unwrap();
        reg
    }

    #[test]
    fn only_terminals_move() {
        let mut reg = registry();
        let walk = RandomWalk2d::new(Bounds::from_max(1_000.0, 1_000.0), 2.0, 4.0, 1.0);
        let mut engine = MobilityEngine::new(walk, reg.len(), 42);
        let moved = engine.advance(&mut reg, 5.0);
        assert_eq!(moved, 1);
        assert_ne!(reg.positions()[0], Coord::new(500.0, 500.0));
        assert_eq!(reg.positions()[1], Coord::new(100.0, 100.0));
    }

    #[test]
    fn constant_engine_keeps_positions() {
        let mut reg = registry();
        let mut engine = MobilityEngine::new(ConstantPosition, reg.len(), 42);
        engine.advance(&mut reg, 5.0);
        assert_eq!(reg.positions()[0], Coord::new(500.0, 500.0));
    }

    #[test]
    fn engine_built_before_provisioning_grows() {
        let mut reg = registry();
        let walk = RandomWalk2d::new(Bounds::from_max(1_000.0, 1_000.0), 2.0, 4.0, 1.0);
        let mut late = MobilityEngine::new(walk.clone(), 0, 42);
        let mut eager = MobilityEngine::new(walk, reg.len(), 42);
        let mut reg2 = registry();
        assert_eq!(late.advance(&mut reg, 1.0), 1);
        eager.advance(&mut reg2, 1.0);
        assert_eq!(late.node_count(), 2);
        assert_eq!(reg.positions(), reg2.positions());
    }
}
