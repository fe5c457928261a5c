#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;
    use std::str::FromStr;

    use itertools::Itertools;
    use proptest::prelude::*;

    use crate::builder::GridBuilder;
    use crate::reachability::ReachabilityIndex;
    use crate::{budget_from_signed, solve, Grid, GridError, Location, Solution, SolveError, Solver, SolverConfig, Tile};

    const ROOM_WITH_DOOR: &str = "\
.......
.#####.
.#...#.
.#.H...
.#...#.
.#####.
.......
";

    fn dims(rows: usize, cols: usize) -> (NonZero<usize>, NonZero<usize>) {
        (NonZero::new(rows).unwrap(), NonZero::new(cols).unwrap())
    }

    /// Panics unless `solution` is a real enclosure of `grid` within `k` walls.
    fn assert_valid(grid: &Grid, solution: &Solution, k: usize) {
        assert!(solution.walls.len() <= k);
        assert!(solution.walls.iter().tuple_windows().all(|(a, b)| a < b), "walls not sorted and unique");

        if solution.area == 0 {
            assert!(solution.walls.is_empty());
            return;
        }

        assert!(solution.walls.iter().all(|wall| grid.tile(*wall) == Some(Tile::Grass)));
        let region = grid.flood_from_agent(&solution.walls.iter().copied().collect());
        assert!(region.iter().all(|location| !grid.is_boundary(*location)), "enclosure touches the boundary");
        assert_eq!(region.len(), solution.area);
    }

    /// Try every placement of at most `k` walls.
    fn brute_force(grid: &Grid, k: usize) -> usize {
        if grid.is_boundary(grid.agent()) {
            return 0;
        }

        let reachable = grid.flood_from_agent(&HashSet::new());
        let grass = reachable.into_iter()
            .filter(|location| grid.tile(*location) == Some(Tile::Grass))
            .sorted()
            .collect_vec();

        (0..=k.min(grass.len()))
            .flat_map(|size| grass.iter().copied().combinations(size))
            .filter_map(|walls| {
                let region = grid.flood_from_agent(&walls.into_iter().collect());
                region.iter().all(|location| !grid.is_boundary(*location)).then_some(region.len())
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn open_three_by_three() {
        let grid = Grid::from_str("...\n.H.\n...\n").unwrap();

        let solution = solve(4, &grid).unwrap();
        assert_eq!(solution.area, 1);
        assert_eq!(solution.walls, vec![Location(0, 1), Location(1, 0), Location(1, 2), Location(2, 1)]);
        assert!(solution.exhaustive);

        let solution = solve(3, &grid).unwrap();
        assert_eq!(solution.area, 0);
        assert!(solution.walls.is_empty());
    }

    #[test]
    fn agent_surrounded_by_water() {
        let grid = Grid::from_str("###\n#H#\n###\n").unwrap();

        for k in 0..3 {
            let solution = solve(k, &grid).unwrap();
            assert_eq!(solution.area, 1);
            assert!(solution.walls.is_empty());
        }
    }

    #[test]
    fn zero_budget() {
        let closed = Grid::from_str("#####\n#...#\n#.H.#\n#####\n").unwrap();
        assert_eq!(solve(0, &closed).unwrap(), Solution { area: 6, walls: vec![], exhaustive: true });

        let open = Grid::from_str("#####\n#...#\n#.H..\n#####\n").unwrap();
        assert_eq!(solve(0, &open).unwrap(), Solution { area: 0, walls: vec![], exhaustive: true });
    }

    #[test]
    fn agent_on_boundary() {
        for text in ["H..\n...\n...\n", "...\n..H\n...\n", "...\n...\n.H.\n", "...\nH..\n...\n"] {
            let grid = Grid::from_str(text).unwrap();
            for k in [0, 1, 5] {
                let solution = solve(k, &grid).unwrap();
                assert_eq!(solution.area, 0);
                assert!(solution.walls.is_empty());
            }
        }
    }

    #[test]
    fn walls_go_as_far_out_as_possible() {
        let grid = Grid::from_str(ROOM_WITH_DOOR).unwrap();

        // walling the doorway would only enclose 9
        let solution = solve(1, &grid).unwrap();
        assert_eq!(solution.area, 10);
        assert_eq!(solution.walls, vec![Location(3, 6)]);

        assert_eq!(solve(0, &grid).unwrap().area, 0);
        assert_eq!(solve(3, &grid).unwrap().area, 10);
    }

    #[test]
    fn spending_more_walls_beats_the_minimum_cut() {
        // one wall under the door encloses the room, two walls on the outer exits enclose the corridor as well
        let grid = Grid::from_str("\
####.####
#.......#
#.#####.#
#.#...#.#
#.#.H.#.#
#.#...#.#
#.##.##.#
#.......#
####.####
").unwrap();

        let solution = solve(1, &grid).unwrap();
        assert_eq!(solution.area, 10);
        assert_eq!(solution.walls, vec![Location(7, 4)]);

        let solution = solve(2, &grid).unwrap();
        assert_eq!(solution.area, 34);
        assert_eq!(solution.walls, vec![Location(0, 4), Location(8, 4)]);

        for k in 0..=4 {
            let solution = solve(k, &grid).unwrap();
            assert_valid(&grid, &solution, k);
            assert_eq!(solution.area, brute_force(&grid, k));
        }
    }

    #[test]
    fn rendering() {
        let grid = Grid::from_str(ROOM_WITH_DOOR).unwrap();
        let solution = solve(1, &grid).unwrap();

        assert_eq!(format!("{}", grid.render(&solution)), "\
.......
.#####.
.#&&&#.
.#&H&&X
.#&&&#.
.#####.
.......
");

        let failed = solve(0, &grid).unwrap();
        assert_eq!(format!("{}", grid.render(&failed)), ROOM_WITH_DOOR);
        assert_eq!(format!("{}", grid), ROOM_WITH_DOOR);
    }

    #[test]
    fn parsing() {
        let grid = Grid::from_str("\n..#\r\n.H.\r\n\n~..\n").unwrap();
        assert_eq!(grid.dims(), (3, 3));
        assert_eq!(grid.agent(), Location(1, 1));
        assert_eq!(grid.tile(Location(0, 2)), Some(Tile::Water));
        assert_eq!(grid.tile(Location(2, 0)), Some(Tile::Water));
        assert_eq!(grid.tile(Location(3, 0)), None);

        assert_eq!(Grid::from_str("\n\n"), Err(GridError::Empty));
        assert_eq!(Grid::from_str("...\n...\n"), Err(GridError::NoAgentFound));
        assert_eq!(Grid::from_str("..H\n.H.\n"), Err(GridError::MultipleAgents { first: Location(0, 2), second: Location(1, 1) }));
        assert_eq!(Grid::from_str("...\n.H\n...\n"), Err(GridError::RaggedRow { row: 1, expected: 3, found: 2 }));
        // blank lines still count towards the reported line
        assert_eq!(Grid::from_str("\n...\n\n.H\n"), Err(GridError::RaggedRow { row: 3, expected: 3, found: 2 }));
    }

    #[test]
    fn builder() {
        let grid = GridBuilder::with_dims(dims(3, 4))
            .add_water_all([Location(0, 0), Location(2, 3)])
            .place_agent(Location(1, 2))
            .build()
            .unwrap();
        assert_eq!(format!("{}", grid), "#...\n..H.\n...#\n");

        let mut builder = GridBuilder::with_dims(dims(3, 3));
        builder.place_agent(Location(3, 0));
        assert_eq!(builder.is_valid(), Some(&vec![GridError::OutOfBounds(Location(3, 0))]));
        // invalid builders ignore everything else
        builder.place_agent(Location(1, 1));
        assert_eq!(builder.build(), Err(GridError::OutOfBounds(Location(3, 0))));

        let mut builder = GridBuilder::with_dims(dims(3, 3));
        builder.place_agent(Location(1, 1)).place_agent(Location(0, 0));
        assert_eq!(builder.build(), Err(GridError::MultipleAgents { first: Location(1, 1), second: Location(0, 0) }));

        let mut builder = GridBuilder::with_dims(dims(3, 3));
        builder.place_agent(Location(1, 1)).add_water(Location(1, 1));
        assert!(builder.is_valid().is_none());
        assert_eq!(builder.build(), Err(GridError::NoAgentFound));
    }

    #[test]
    fn huge_budgets() {
        let grid = Grid::from_str("#####\n#...#\n#.H..\n#...#\n#####").unwrap();
        let expected = Solution { area: 9, walls: vec![Location(2, 4)], exhaustive: true };

        for k in [u32::MAX as usize, u32::MAX as usize + 1, usize::MAX] {
            assert_eq!(solve(k, &grid).unwrap(), expected);
        }
    }

    #[test]
    fn budget_must_be_non_negative() {
        assert_eq!(budget_from_signed(3), Ok(3));
        assert_eq!(budget_from_signed(-1), Err(SolveError::InvalidBudget(-1)));
    }

    #[test]
    fn cell_limit() {
        let grid = Grid::from_str(ROOM_WITH_DOOR).unwrap();
        let solver = Solver::with_config(SolverConfig { max_cells: Some(3), ..Default::default() });
        assert!(matches!(solver.solve(1, &grid), Err(SolveError::TooManyCells { limit: 3, .. })));

        let solver = Solver::with_config(SolverConfig { max_cells: Some(100), ..Default::default() });
        assert_eq!(solver.solve(1, &grid).unwrap().area, 10);
    }

    #[test]
    fn state_limit_keeps_best_so_far() {
        let grid = Grid::from_str(ROOM_WITH_DOOR).unwrap();
        let solver = Solver::with_config(SolverConfig { state_limit: Some(1), ..Default::default() });

        let solution = solver.solve(1, &grid).unwrap();
        assert!(!solution.exhaustive);
        assert_valid(&grid, &solution, 1);
    }

    #[test]
    fn reachability_index_is_stable() {
        let grid = Grid::from_str(ROOM_WITH_DOOR).unwrap();
        let first = ReachabilityIndex::new(&grid);
        let second = ReachabilityIndex::new(&grid);

        assert_eq!(first.len(), 34);
        assert_eq!(first.cell(0).location, grid.agent());
        let everything = |index: &ReachabilityIndex| {
            let mut all = index.empty_set();
            all.insert_range(..);
            index.locations_of(&all)
        };
        assert_eq!(everything(&first), everything(&second));
        assert_eq!(
            everything(&first).into_iter().collect::<HashSet<_>>(),
            grid.flood_from_agent(&HashSet::new()),
        );
    }

    fn small_grid() -> impl Strategy<Value = Grid> {
        (3usize..=6, 3usize..=6)
            .prop_flat_map(|(rows, cols)| (
                Just((rows, cols)),
                proptest::collection::vec(proptest::bool::weighted(0.25), rows * cols),
                1..rows - 1,
                1..cols - 1,
            ))
            .prop_map(|((rows, cols), water, agent_row, agent_col)| {
                GridBuilder::with_dims(dims(rows, cols))
                    .add_water_all(water.iter().positions(|is_water| *is_water).map(|i| Location(i / cols, i % cols)))
                    .place_agent(Location(agent_row, agent_col))
                    .build()
                    .unwrap()
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn matches_brute_force(grid in small_grid(), k in 0usize..=3) {
            let solution = solve(k, &grid).unwrap();
            assert_valid(&grid, &solution, k);
            prop_assert!(solution.exhaustive);
            prop_assert_eq!(solution.area, brute_force(&grid, k));
        }

        #[test]
        fn area_grows_with_budget(grid in small_grid()) {
            let areas = (0..=4).map(|k| solve(k, &grid).unwrap().area).collect_vec();
            prop_assert!(areas.iter().tuple_windows().all(|(a, b)| a <= b), "{:?}", areas);
        }

        #[test]
        fn boundary_agent_is_never_enclosed(
            (rows, cols, agent) in (2usize..=6, 2usize..=6).prop_flat_map(|(rows, cols)| (
                Just(rows),
                Just(cols),
                prop_oneof![
                    (0..cols).prop_map(|col| Location(0, col)),
                    (0..cols).prop_map(move |col| Location(rows - 1, col)),
                    (0..rows).prop_map(|row| Location(row, 0)),
                    (0..rows).prop_map(move |row| Location(row, cols - 1)),
                ],
            )),
            k in 0usize..=6,
        ) {
            let grid = GridBuilder::with_dims(dims(rows, cols)).place_agent(agent).build().unwrap();
            prop_assert_eq!(solve(k, &grid).unwrap(), Solution { area: 0, walls: vec![], exhaustive: true });
        }
    }
}
