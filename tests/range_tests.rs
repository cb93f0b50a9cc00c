use navgrid::{Aabb, CollisionVolume, Grid, StaticObstacleScene};
use std::collections::HashSet;

fn coords_of(tiles: &[&navgrid::Tile]) -> HashSet<(i32, i32)> {
    tiles.iter().map(|t| (t.x, t.y)).collect()
}

#[test]
fn corner_tile_has_two_neighbours() {
    let grid = Grid::new(3, 3, 10.0, 10.0);
    let corner = grid.get_tile(0, 0).unwrap();

    let neighbours = grid.neighbours(corner, None);
    assert_eq!(coords_of(&neighbours), HashSet::from([(1, 0), (0, 1)]));
}

#[test]
fn interior_tile_has_four_neighbours_in_fixed_order() {
    let grid = Grid::new(3, 3, 10.0, 10.0);
    let center = grid.get_tile(1, 1).unwrap();

    let neighbours = grid.neighbours(center, None);
    let order: Vec<(i32, i32)> = neighbours.iter().map(|t| (t.x, t.y)).collect();
    // North, south, east, west
    assert_eq!(order, vec![(1, 0), (1, 2), (2, 1), (0, 1)]);
}

#[test]
fn unit_cost_range_one_is_the_orthogonal_neighbourhood() {
    let grid = Grid::new(3, 3, 10.0, 10.0);
    let center = grid.get_tile(1, 1).unwrap();

    let in_range = grid.tiles_in_range(center, 1.0, None);
    assert_eq!(
        coords_of(&in_range),
        HashSet::from([(1, 0), (1, 2), (2, 1), (0, 1)])
    );
}

#[test]
fn range_zero_or_negative_is_empty() {
    let grid = Grid::new(3, 3, 10.0, 10.0);
    let center = grid.get_tile(1, 1).unwrap();

    assert!(grid.tiles_in_range(center, 0.0, None).is_empty());
    assert!(grid.tiles_in_range(center, -2.0, None).is_empty());
}

#[test]
fn origin_is_never_in_the_result() {
    let grid = Grid::new(3, 3, 10.0, 10.0);
    let center = grid.get_tile(1, 1).unwrap();

    let in_range = grid.tiles_in_range(center, 100.0, None);
    assert_eq!(in_range.len(), 8);
    assert!(!coords_of(&in_range).contains(&(1, 1)));
}

#[test]
fn each_tile_appears_at_most_once() {
    let grid = Grid::new(4, 4, 10.0, 10.0);
    let origin = grid.get_tile(0, 0).unwrap();

    let in_range = grid.tiles_in_range(origin, 4.0, None);
    let unique = coords_of(&in_range);
    assert_eq!(in_range.len(), unique.len());
}

#[test]
fn expensive_tile_halts_expansion() {
    let mut grid = Grid::new(3, 3, 10.0, 10.0);
    grid.get_tile_mut(1, 1).unwrap().cost = 10.0;

    let origin_coords = (0, 0);
    let origin = grid.get_tile(origin_coords.0, origin_coords.1).unwrap();
    let in_range = grid.tiles_in_range(origin, 2.0, None);

    // The center costs more than the whole budget; only the cheap rim within
    // cost 2 is reachable
    assert_eq!(
        coords_of(&in_range),
        HashSet::from([(1, 0), (0, 1), (2, 0), (0, 2)])
    );
}

#[test]
fn tiles_are_kept_at_their_cheapest_path() {
    let mut grid = Grid::new(3, 3, 10.0, 10.0);
    grid.get_tile_mut(1, 1).unwrap().cost = 10.0;

    let origin = grid.get_tile(0, 0).unwrap();
    // Budget 4 reaches every rim tile by going around the expensive center
    let in_range = grid.tiles_in_range(origin, 4.0, None);

    let expected = HashSet::from([
        (1, 0),
        (0, 1),
        (2, 0),
        (0, 2),
        (2, 1),
        (1, 2),
        (2, 2),
    ]);
    assert_eq!(coords_of(&in_range), expected);
}

#[test]
fn impassable_tiles_are_never_admitted() {
    let mut grid = Grid::new(3, 1, 10.0, 10.0);
    grid.get_tile_mut(1, 0).unwrap().block();

    let origin = grid.get_tile(0, 0).unwrap();
    let in_range = grid.tiles_in_range(origin, 100.0, None);
    assert!(in_range.is_empty(), "the wall seals off the corridor");
}

#[test]
fn result_is_deterministic() {
    let mut grid = Grid::new(5, 5, 10.0, 10.0);
    grid.get_tile_mut(2, 2).unwrap().cost = 3.0;
    grid.get_tile_mut(1, 3).unwrap().cost = 2.0;

    let origin = grid.get_tile(2, 1).unwrap();
    let first: Vec<(i32, i32)> = grid
        .tiles_in_range(origin, 4.0, None)
        .iter()
        .map(|t| (t.x, t.y))
        .collect();
    let second: Vec<(i32, i32)> = grid
        .tiles_in_range(origin, 4.0, None)
        .iter()
        .map(|t| (t.x, t.y))
        .collect();
    assert_eq!(first, second);
}

#[test]
fn obstruction_filter_limits_reachability() {
    let mut grid = Grid::new(3, 3, 10.0, 10.0);

    // A wide blocker centered in cell (0, 0) juts into the corridor between
    // (1, 1) and (1, 0); its center is outside both sweep endpoints
    let mut scene = StaticObstacleScene::new();
    scene.add_obstacle(Aabb::new(2.0, 2.0, 16.0, 8.0));
    grid.set_collision_scene(Box::new(scene));

    let volume = CollisionVolume::new(1.0, 10.0);
    let center = grid.get_tile(1, 1).unwrap();

    let neighbours = grid.neighbours(center, Some(&volume));
    assert_eq!(
        coords_of(&neighbours),
        HashSet::from([(1, 2), (2, 1), (0, 1)]),
        "north neighbour is swept-blocked"
    );

    let in_range = grid.tiles_in_range(center, 2.0, Some(&volume));
    let expected = HashSet::from([
        (1, 2),
        (2, 1),
        (0, 1),
        (2, 0),
        (2, 2),
        (0, 2),
        (0, 0),
    ]);
    assert_eq!(coords_of(&in_range), expected);
    assert!(!coords_of(&in_range).contains(&(1, 0)));
}

#[test]
fn without_volume_no_obstruction_filtering_happens() {
    let mut grid = Grid::new(3, 3, 10.0, 10.0);
    let mut scene = StaticObstacleScene::new();
    scene.add_obstacle(Aabb::new(2.0, 2.0, 16.0, 8.0));
    grid.set_collision_scene(Box::new(scene));

    let center = grid.get_tile(1, 1).unwrap();
    assert_eq!(grid.neighbours(center, None).len(), 4);
}
