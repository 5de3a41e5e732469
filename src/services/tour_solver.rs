//! Heurística del vecino más cercano
//!
//! Ordena los waypoints partiendo del índice 0 y eligiendo siempre el punto
//! no visitado más cercano por distancia (no por duración). Es O(N²) y no
//! garantiza optimalidad; no se aplica ninguna mejora posterior (2-opt, etc.).

use crate::models::routing::{DistanceMatrix, Tour};

/// Calcular el tour greedy sobre la matriz.
///
/// Los empates se resuelven por índice ascendente: sólo una distancia
/// estrictamente menor reemplaza al candidato actual. Si todos los puntos
/// restantes son inalcanzables se toma el de menor índice para que el tour
/// quede completo.
pub fn solve_nearest_neighbor(matrix: &DistanceMatrix, return_to_start: bool) -> Tour {
    let n = matrix.len();
    let mut visited = vec![false; n];
    let mut stops = Vec::with_capacity(n + 1);

    stops.push(0);
    if n > 0 {
        visited[0] = true;
    }

    let mut current = 0;
    for _ in 1..n {
        let mut nearest: Option<(usize, f64)> = None;

        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            let distance = matrix.distance(current, candidate);
            match nearest {
                None => nearest = Some((candidate, distance)),
                Some((_, best)) if distance < best => nearest = Some((candidate, distance)),
                _ => {}
            }
        }

        let Some((next, _)) = nearest else { break };
        visited[next] = true;
        stops.push(next);
        current = next;
    }

    if return_to_start {
        stops.push(0);
    }

    Tour::new(stops, return_to_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn matrix(rows: Vec<Vec<f64>>) -> DistanceMatrix {
        DistanceMatrix::from_distances(rows).unwrap()
    }

    #[rstest]
    #[case(false, vec![0, 1])]
    #[case(true, vec![0, 1, 0])]
    fn single_waypoint_yields_trivial_tour(#[case] return_to_start: bool, #[case] expected: Vec<usize>) {
        let tour = solve_nearest_neighbor(&matrix(vec![vec![0.0, 7.0], vec![7.0, 0.0]]), return_to_start);
        assert_eq!(tour.stops(), expected.as_slice());
    }

    #[test]
    fn first_hop_is_the_closest_to_start() {
        let tour = solve_nearest_neighbor(
            &matrix(vec![
                vec![0.0, 5.0, 1.0, 3.0],
                vec![5.0, 0.0, 2.0, 2.0],
                vec![1.0, 2.0, 0.0, 4.0],
                vec![3.0, 2.0, 4.0, 0.0],
            ]),
            false,
        );

        assert_eq!(tour.stops()[1], 2);
        // 2 -> 1 (2.0) antes que 2 -> 3 (4.0), luego 3
        assert_eq!(tour.stops(), &[0, 2, 1, 3]);
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let tour = solve_nearest_neighbor(
            &matrix(vec![
                vec![0.0, 4.0, 4.0, 4.0],
                vec![4.0, 0.0, 1.0, 1.0],
                vec![4.0, 1.0, 0.0, 1.0],
                vec![4.0, 1.0, 1.0, 0.0],
            ]),
            false,
        );

        assert_eq!(tour.stops(), &[0, 1, 2, 3]);
    }

    #[test]
    fn uses_directional_distances() {
        // 0 -> 2 es corto, pero 2 -> 0 no importa: sólo cuenta la fila actual
        let tour = solve_nearest_neighbor(
            &matrix(vec![
                vec![0.0, 9.0, 2.0],
                vec![1.0, 0.0, 1.0],
                vec![100.0, 3.0, 0.0],
            ]),
            true,
        );

        assert_eq!(tour.stops(), &[0, 2, 1, 0]);
        assert!(tour.returns_to_start());
    }

    #[test]
    fn unreachable_waypoints_are_still_visited() {
        let matrix = DistanceMatrix::from_tables(
            vec![
                vec![Some(0.0), None, Some(5.0)],
                vec![None, Some(0.0), None],
                vec![Some(5.0), None, Some(0.0)],
            ],
            vec![vec![Some(0.0); 3]; 3],
        )
        .unwrap();

        let tour = solve_nearest_neighbor(&matrix, false);
        assert_eq!(tour.stops(), &[0, 2, 1]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: every waypoint index is visited exactly once and the tour
        /// is anchored at the start.
        #[test]
        fn tour_is_a_permutation_anchored_at_start(
            rows in (1_usize..=12).prop_flat_map(|n| {
                proptest::collection::vec(proptest::collection::vec(0.0_f64..10_000.0, n + 1), n + 1)
            }),
            return_to_start in any::<bool>(),
        ) {
            let n = rows.len() - 1;
            let tour = solve_nearest_neighbor(&matrix(rows), return_to_start);
            let stops = tour.stops();

            prop_assert_eq!(stops[0], 0);
            prop_assert_eq!(stops.len(), if return_to_start { n + 2 } else { n + 1 });
            if return_to_start {
                prop_assert_eq!(*stops.last().unwrap(), 0);
            }

            let mut visited: Vec<usize> = tour.waypoint_indices().collect();
            visited.sort_unstable();
            prop_assert_eq!(visited, (1..=n).collect::<Vec<_>>());
        }
    }
}
