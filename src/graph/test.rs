#[cfg(test)]
mod test {
    use std::time::Instant;

    use crate::error::FlowError;
    use crate::graph::{compute_max_flow, cut_capacity, MaxFlowSolver, SolverState};
    use crate::rpc::call_context::CallContext;
    use crate::types::{CapacityMatrix, Edge};

    fn build_capacities(size: usize, input: &[(usize, usize, u32)]) -> CapacityMatrix {
        let edges = input
            .iter()
            .map(|(from, to, capacity)| Edge::new(*from, *to, *capacity))
            .collect::<Vec<_>>();
        CapacityMatrix::from_edges(size, &edges)
    }

    #[test]
    fn direct() {
        let capacities = build_capacities(3, &[(1, 2, 5)]);
        let flow = compute_max_flow(&capacities, 1, 2, None, &CallContext::default()).unwrap();
        assert_eq!(flow.value, 5);
        assert_eq!(flow.augmentations, 1);
        assert_eq!(flow.flows, vec![Edge::new(1, 2, 5)]);
        assert_eq!(flow.min_cut, vec![1]);
    }

    #[test]
    fn two_routes() {
        let capacities = build_capacities(4, &[(1, 2, 3), (2, 3, 2), (1, 3, 1)]);
        let flow = compute_max_flow(&capacities, 1, 3, None, &CallContext::default()).unwrap();
        assert_eq!(flow.value, 3);
        assert_eq!(
            flow.flows,
            vec![Edge::new(1, 2, 2), Edge::new(1, 3, 1), Edge::new(2, 3, 2)]
        );
    }

    #[test]
    fn diamond() {
        let capacities = build_capacities(
            4,
            &[(0, 1, 10), (0, 2, 7), (1, 3, 9), (2, 3, 8)],
        );
        let flow = compute_max_flow(&capacities, 0, 3, None, &CallContext::default()).unwrap();
        assert_eq!(flow.value, 16);
        assert_eq!(flow.augmentations, 2);
        assert_eq!(flow.min_cut, vec![0, 1]);
    }

    #[test]
    fn cancels_flow_on_reverse_edge() {
        // 0-1-3-5 is found first and blocks 3 -> 5, so the second unit
        // travels 0-2-3-1-4-5 and cancels the flow on 1 -> 3.
        let capacities = build_capacities(
            6,
            &[
                (0, 1, 1),
                (0, 2, 1),
                (1, 3, 1),
                (2, 3, 1),
                (3, 5, 1),
                (1, 4, 1),
                (4, 5, 1),
            ],
        );
        let flow = compute_max_flow(&capacities, 0, 5, None, &CallContext::default()).unwrap();
        assert_eq!(flow.value, 2);
    }

    #[test]
    fn symmetric_capacities_allow_cancellation() {
        // 1 <-> 2 with capacity 4 both ways. 0-1-2-5 saturates 1 -> 2, then
        // 0-3-2-1-4-5 pushes 8 units over 2 -> 1: 4 cancelled plus 4 own.
        let capacities = build_capacities(
            6,
            &[
                (0, 1, 4),
                (1, 2, 4),
                (2, 1, 4),
                (2, 5, 4),
                (0, 3, 8),
                (3, 2, 8),
                (1, 4, 8),
                (4, 5, 8),
            ],
        );
        let flow = compute_max_flow(&capacities, 0, 5, None, &CallContext::default()).unwrap();
        assert_eq!(flow.value, 12);
        assert_eq!(flow.augmentations, 2);
        assert_eq!(
            flow.flows,
            vec![
                Edge::new(0, 1, 4),
                Edge::new(0, 3, 8),
                Edge::new(1, 4, 8),
                Edge::new(2, 1, 4),
                Edge::new(2, 5, 4),
                Edge::new(3, 2, 8),
                Edge::new(4, 5, 8),
            ]
        );
        assert_eq!(flow.min_cut, vec![0]);
        assert_eq!(cut_capacity(&capacities, &[true, false, false, false, false, false]), 12);
    }

    #[test]
    fn reverse_edge_bookkeeping() {
        let capacities = build_capacities(4, &[(0, 1, 3), (1, 2, 3), (2, 1, 3), (2, 3, 3)]);
        let mut solver = MaxFlowSolver::new(&capacities, 0, 3).unwrap();
        assert_eq!(solver.step(), SolverState::Running);
        let residual = solver.residual();
        assert_eq!(residual.residual(1, 2), 0);
        assert_eq!(residual.residual(2, 1), 6);
        for u in 0..4 {
            for v in 0..4 {
                assert_eq!(
                    residual.residual(u, v) + residual.residual(v, u),
                    capacities.get(u, v) as u64 + capacities.get(v, u) as u64
                );
            }
        }
        assert_eq!(solver.step(), SolverState::Done);
        assert_eq!(solver.step(), SolverState::Done);
        assert_eq!(solver.flow(), 3);
        assert_eq!(solver.augmentations(), 1);
    }

    #[test]
    fn disconnected() {
        let capacities = build_capacities(4, &[(1, 2, 3), (3, 2, 2)]);
        let flow = compute_max_flow(&capacities, 1, 3, None, &CallContext::default()).unwrap();
        assert_eq!(flow.value, 0);
        assert_eq!(flow.augmentations, 0);
        assert!(flow.flows.is_empty());
        assert_eq!(flow.min_cut, vec![1, 2]);
    }

    #[test]
    fn invalid_endpoints() {
        let capacities = build_capacities(3, &[(1, 2, 3)]);
        let context = CallContext::default();
        assert!(matches!(
            compute_max_flow(&capacities, 3, 2, None, &context),
            Err(FlowError::SourceOutOfRange { vertex: 3, size: 3 })
        ));
        assert!(matches!(
            compute_max_flow(&capacities, 1, 7, None, &context),
            Err(FlowError::SinkOutOfRange { vertex: 7, size: 3 })
        ));
        assert!(matches!(
            compute_max_flow(&capacities, 2, 2, None, &context),
            Err(FlowError::SourceEqualsSink(2))
        ));
    }

    #[test]
    fn expired_deadline_reports_partial_flow() {
        let capacities = build_capacities(4, &[(1, 2, 3), (2, 3, 2), (1, 3, 1)]);
        let result = compute_max_flow(
            &capacities,
            1,
            3,
            Some(Instant::now()),
            &CallContext::default(),
        );
        match result {
            Err(FlowError::DeadlineExceeded {
                partial_flow,
                augmentations,
            }) => {
                assert_eq!(augmentations, 1);
                assert!(partial_flow > 0 && partial_flow < 3);
            }
            other => panic!("expected deadline error, got {other:?}"),
        }
    }

    #[test]
    fn expired_deadline_without_path_is_complete() {
        let capacities = build_capacities(3, &[(2, 1, 3)]);
        let flow =
            compute_max_flow(&capacities, 1, 2, Some(Instant::now()), &CallContext::default())
                .unwrap();
        assert_eq!(flow.value, 0);
    }
}
