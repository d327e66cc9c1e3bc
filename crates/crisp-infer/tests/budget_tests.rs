use crisp_infer::tile_size_for;

#[test]
fn test_documented_examples() {
    assert_eq!(tile_size_for(Some(3000)), 400);
    assert_eq!(tile_size_for(Some(2600)), 200, "boundary is exclusive");
    assert_eq!(tile_size_for(Some(800)), 200);
    assert_eq!(tile_size_for(Some(300)), 100);
    assert_eq!(tile_size_for(Some(10)), 32);
}

#[test]
fn test_codomain_is_fixed() {
    for h in [0, 1, 250, 251, 740, 741, 2600, 2601, 10_000, u64::MAX] {
        let tile = tile_size_for(Some(h));
        assert!(
            [400, 200, 100, 32].contains(&tile),
            "unexpected tile size {tile} for headroom {h}"
        );
    }
}

#[test]
fn test_boundaries_are_exclusive() {
    assert_eq!(tile_size_for(Some(2601)), 400);
    assert_eq!(tile_size_for(Some(741)), 200);
    assert_eq!(tile_size_for(Some(740)), 100);
    assert_eq!(tile_size_for(Some(251)), 100);
    assert_eq!(tile_size_for(Some(250)), 32);
    assert_eq!(tile_size_for(Some(0)), 32);
}

#[test]
fn test_undefined_headroom_is_the_floor() {
    assert_eq!(tile_size_for(None), 32);
}

#[test]
fn test_monotonically_non_increasing() {
    let mut prev = u32::MAX;
    for h in (0..4000).rev() {
        let tile = tile_size_for(Some(h));
        assert!(tile <= prev, "tile size grew as headroom shrank at {h}");
        prev = tile;
    }
}
