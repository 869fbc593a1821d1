//! Unit tests for hn-attach.

#[cfg(test)]
mod helpers {
    use hn_core::{CapabilitySet, Coord, NodeId, Rat};
    use hn_registry::{NodeKind, NodeRegistry};

    pub fn terminal(reg: &mut NodeRegistry, caps: CapabilitySet, x: f64, y: f64) -> NodeId {
        let id = reg.create_node(NodeKind::Terminal, caps).unwrap();
        reg.set_position(id, Coord::new(x, y)).unwrap();
        id
    }

    pub fn cell(reg: &mut NodeRegistry, rat: Rat, x: f64, y: f64) -> NodeId {
        let id = reg.create_node(NodeKind::Cell, CapabilitySet::single(rat)).unwrap();
        reg.set_position(id, Coord::new(x, y)).unwrap();
        id
    }
}

// ── Topology ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod topology {
    use hn_core::{CapabilitySet, CellId, Coord, NodeId, Rat};
    use hn_registry::{NodeKind, NodeRegistry};

    use super::helpers::cell;
    use crate::{AttachError, CellTopology, CellTopologyBuilder};

    #[test]
    fn empty_rat_has_no_nearest() {
        let mut b = CellTopologyBuilder::new();
        b.add_cell(Rat::Lte, Coord::new(0.0, 0.0));
        let topo = b.build();
        assert!(topo.nearest(Rat::MmWave, Coord::ORIGIN).is_none());
        assert_eq!(topo.count(Rat::MmWave), 0);
    }

    #[test]
    fn nearest_only_searches_requested_rat() {
        let mut b = CellTopologyBuilder::new();
        let _lte = b.add_cell(Rat::Lte, Coord::new(1.0, 0.0));
        let mm = b.add_cell(Rat::MmWave, Coord::new(100.0, 0.0));
        let topo = b.build();
        let (id, d) = topo.nearest(Rat::MmWave, Coord::ORIGIN).unwrap();
        assert_eq!(id, mm);
        assert!((d - 100.0).abs() < 1e-12);
    }

    #[test]
    fn tie_goes_to_lowest_cell_id() {
        // Four cells on a circle of radius 10 around the origin.
        let mut b = CellTopologyBuilder::new();
        let ids: Vec<CellId> = [(10.0, 0.0), (0.0, 10.0), (-10.0, 0.0), (0.0, -10.0)]
            .into_iter()
            .map(|(x, y)| b.add_cell(Rat::MmWave, Coord::new(x, y)))
            .collect();
        let topo = b.build();
        assert_eq!(topo.nearest(Rat::MmWave, Coord::ORIGIN).unwrap().0, ids[0]);
    }

    #[test]
    fn tie_break_independent_of_tree_order() {
        // Integer points on a radius-25 circle: every squared distance is
        // exactly 625, so all twenty cells of a ring tie.
        let ring: Vec<(f64, f64)> = [(0.0, 25.0), (7.0, 24.0), (15.0, 20.0), (20.0, 15.0), (24.0, 7.0)]
            .into_iter()
            .flat_map(|(a, b)| [(a, b), (b, -a), (-a, -b), (-b, a)])
            .collect();
        let centres = [Coord::new(500.0, 500.0), Coord::new(2_000.0, 300.0), Coord::new(1_200.0, 3_100.0)];

        let mut b = CellTopologyBuilder::new();
        let mut tied: Vec<Vec<CellId>> = vec![Vec::new(); centres.len()];
        // Interleave rings in reverse ring order with farther decoys, so
        // neither insertion order nor bulk-load order favours the lowest id.
        for (i, &(dx, dy)) in ring.iter().rev().enumerate() {
            for (c, centre) in centres.iter().enumerate() {
                let decoy = 40.0 + i as f64;
                b.add_cell(Rat::MmWave, Coord::new(centre.x + decoy, centre.y - decoy));
                tied[c].push(b.add_cell(Rat::MmWave, Coord::new(centre.x + dx, centre.y + dy)));
            }
        }
        let topo = b.build();

        for (c, &centre) in centres.iter().enumerate() {
            let scan = topo
                .cells_of(Rat::MmWave)
                .map(|cell| (cell.position.distance_sq(centre), cell.id))
                .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
                .unwrap();
            let lowest = *tied[c].iter().min().unwrap();
            assert_eq!(scan, (625.0, lowest));

            let (id, d) = topo.nearest(Rat::MmWave, centre).unwrap();
            assert_eq!(id, lowest, "centre {centre}");
            assert_eq!(d, 25.0);
        }
    }

    #[test]
    fn matches_linear_scan() {
        let mut b = CellTopologyBuilder::new();
        for i in 0..50u32 {
            let x = f64::from((i * 37) % 101);
            let y = f64::from((i * 53) % 97);
            b.add_cell(Rat::Lte, Coord::new(x * 10.0, y * 10.0));
        }
        let topo = b.build();
        for q in 0..40u32 {
            let p = Coord::new(f64::from(q * 23 % 1000), f64::from(q * 71 % 1000));
            let scan = topo
                .cells_of(Rat::Lte)
                .map(|c| (c.position.distance_sq(p), c.id))
                .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
                .unwrap()
                .1;
            assert_eq!(topo.nearest(Rat::Lte, p).unwrap().0, scan, "query {p}");
        }
    }

    #[test]
    fn from_registry_assigns_ids_in_node_order() {
        let mut reg = NodeRegistry::new();
        reg.create_node(NodeKind::Terminal, CapabilitySet::multi_connectivity()).unwrap();
        let a = cell(&mut reg, Rat::MmWave, 0.0, 0.0);
        let b = cell(&mut reg, Rat::Lte, 5.0, 5.0);
        let topo = CellTopology::from_registry(&reg).unwrap();
        assert_eq!(topo.len(), 2);
        assert_eq!(topo.cell(CellId(0)).unwrap().node, a);
        assert_eq!(topo.cell(CellId(1)).unwrap().node, b);
        assert_eq!(topo.cell(CellId(1)).unwrap().rat, Rat::Lte);
    }

    #[test]
    fn cell_without_rat_rejected() {
        let mut reg = NodeRegistry::new();
        reg.create_node(NodeKind::Cell, CapabilitySet::EMPTY).unwrap();
        assert_eq!(
            CellTopology::from_registry(&reg).err(),
            Some(AttachError::CellWithoutRat(NodeId(0)))
        );
    }
}

// ── Attachment policy ─────────────────────────────────────────────────────────

#[cfg(test)]
mod policy {
    use hn_core::{Capability, CapabilitySet, CellId, Coord, NodeId, Rat};
    use hn_registry::{NodeKind, NodeRegistry};

    use super::helpers::{cell, terminal};
    use crate::{attach_closest, AttachError, CellTopology, Unattached};

    /// Four mmWave cells on a 2x2 grid and one central LTE macro, with three
    /// multi-connectivity terminals per mmWave cell.
    fn reference_scenario() -> (NodeRegistry, Vec<NodeId>) {
        let mut reg = NodeRegistry::new();
        let centres = [(1_000.0, 1_000.0), (3_000.0, 1_000.0), (1_000.0, 3_000.0), (3_000.0, 3_000.0)];
        let mut terminals = Vec::new();
        for &(cx, cy) in &centres {
            for k in 0..3 {
                let off = 50.0 * f64::from(k + 1);
                terminals.push(terminal(&mut reg, CapabilitySet::multi_connectivity(), cx + off, cy));
            }
        }
        for &(cx, cy) in &centres {
            cell(&mut reg, Rat::MmWave, cx, cy);
        }
        cell(&mut reg, Rat::Lte, 2_000.0, 2_000.0);
        (reg, terminals)
    }

    #[test]
    fn reference_scenario_gives_two_records_each() {
        let (reg, terminals) = reference_scenario();
        let topo = CellTopology::from_registry(&reg).unwrap();
        let table = attach_closest(&reg, terminals.iter().copied(), &topo).unwrap();
        assert_eq!(table.len(), 24);
        assert!(table.unattached().is_empty());
        for (i, &t) in terminals.iter().enumerate() {
            assert_eq!(table.records_of(t).count(), 2);
            // Terminals were placed around mmWave cell i / 3.
            assert_eq!(table.get(t, Rat::MmWave).unwrap().cell, CellId((i / 3) as u32));
            assert_eq!(table.get(t, Rat::Lte).unwrap().cell, CellId(4));
        }
    }

    #[test]
    fn attachment_is_deterministic() {
        let (reg, terminals) = reference_scenario();
        let topo = CellTopology::from_registry(&reg).unwrap();
        let a = attach_closest(&reg, terminals.iter().copied(), &topo).unwrap();
        let b = attach_closest(&reg, terminals.iter().copied(), &topo).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn equidistant_terminal_picks_lower_cell() {
        let mut reg = NodeRegistry::new();
        let t = terminal(&mut reg, CapabilitySet::multi_connectivity(), 50.0, 0.0);
        cell(&mut reg, Rat::MmWave, 0.0, 0.0);
        cell(&mut reg, Rat::MmWave, 100.0, 0.0);
        let topo = CellTopology::from_registry(&reg).unwrap();
        let table = attach_closest(&reg, [t], &topo).unwrap();
        assert_eq!(table.get(t, Rat::MmWave).unwrap().cell, CellId(0));
    }

    #[test]
    fn missing_rat_marks_every_terminal_unattached() {
        let mut reg = NodeRegistry::new();
        let t0 = terminal(&mut reg, CapabilitySet::multi_connectivity(), 0.0, 0.0);
        let t1 = terminal(&mut reg, CapabilitySet::multi_connectivity(), 10.0, 0.0);
        cell(&mut reg, Rat::MmWave, 5.0, 5.0);
        let topo = CellTopology::from_registry(&reg).unwrap();
        let table = attach_closest(&reg, [t0, t1], &topo).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.unattached(),
            &[Unattached { terminal: t0, rat: Rat::Lte }, Unattached { terminal: t1, rat: Rat::Lte }]
        );
        assert!(table.is_attached(t0));
    }

    #[test]
    fn single_connectivity_prefers_mmwave() {
        let mut reg = NodeRegistry::new();
        let caps: CapabilitySet = [Capability::Lte, Capability::MmWave].into_iter().collect();
        let t = terminal(&mut reg, caps, 0.0, 0.0);
        cell(&mut reg, Rat::Lte, 1.0, 0.0);
        cell(&mut reg, Rat::MmWave, 500.0, 0.0);
        let topo = CellTopology::from_registry(&reg).unwrap();
        let table = attach_closest(&reg, [t], &topo).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.get(t, Rat::MmWave).is_some());
    }

    #[test]
    fn single_connectivity_falls_back_to_lte() {
        let mut reg = NodeRegistry::new();
        let caps: CapabilitySet = [Capability::Lte, Capability::MmWave].into_iter().collect();
        let t = terminal(&mut reg, caps, 0.0, 0.0);
        cell(&mut reg, Rat::Lte, 1.0, 0.0);
        let topo = CellTopology::from_registry(&reg).unwrap();
        let table = attach_closest(&reg, [t], &topo).unwrap();
        assert!(table.get(t, Rat::Lte).is_some());
        assert!(table.unattached().is_empty());
    }

    #[test]
    fn no_cells_at_all_leaves_terminal_unattached() {
        let mut reg = NodeRegistry::new();
        let t = terminal(&mut reg, CapabilitySet::single(Rat::Lte), 0.0, 0.0);
        let topo = CellTopology::from_registry(&reg).unwrap();
        let table = attach_closest(&reg, [t], &topo).unwrap();
        assert!(!table.is_attached(t));
        assert_eq!(table.unattached(), &[Unattached { terminal: t, rat: Rat::Lte }]);
    }

    #[test]
    fn serving_changed_after_move() {
        let mut reg = NodeRegistry::new();
        let t = terminal(&mut reg, CapabilitySet::single(Rat::MmWave), 10.0, 0.0);
        cell(&mut reg, Rat::MmWave, 0.0, 0.0);
        cell(&mut reg, Rat::MmWave, 1_000.0, 0.0);
        let topo = CellTopology::from_registry(&reg).unwrap();
        let before = attach_closest(&reg, [t], &topo).unwrap();
        let same = attach_closest(&reg, [t], &topo).unwrap();
        assert!(!same.serving_changed(&before, t));

        reg.set_position(t, Coord::new(990.0, 0.0)).unwrap();
        let after = attach_closest(&reg, [t], &topo).unwrap();
        assert!(after.serving_changed(&before, t));
    }

    #[test]
    fn cell_id_is_not_a_terminal() {
        let mut reg = NodeRegistry::new();
        let c = reg.create_node(NodeKind::Cell, CapabilitySet::single(Rat::Lte)).unwrap();
        let topo = CellTopology::from_registry(&reg).unwrap();
        assert_eq!(attach_closest(&reg, [c], &topo).err(), Some(AttachError::NotATerminal(c)));
    }

    #[test]
    fn unknown_terminal_is_registry_error() {
        let reg = NodeRegistry::new();
        let topo = CellTopology::from_registry(&reg).unwrap();
        assert!(matches!(
            attach_closest(&reg, [NodeId(9)], &topo),
            Err(AttachError::Registry(_))
        ));
    }
}
