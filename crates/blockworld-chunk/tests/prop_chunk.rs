use blockworld_blocks::{Voxel, VoxelFace, VoxelType};
use blockworld_chunk::{
    CHUNK_HEIGHT, CHUNK_SIZE, CHUNK_VOLUME, Cardinal, Chunk, ChunkCoord, ChunkStore, NoNeighbours,
};
use proptest::prelude::*;

fn arb_type() -> impl Strategy<Value = VoxelType> {
    (0u8..VoxelType::COUNT as u8).prop_map(|v| VoxelType::from_u8(v).unwrap())
}

fn local_pos() -> impl Strategy<Value = (i32, i32, i32)> {
    (0..CHUNK_SIZE as i32, 0..CHUNK_HEIGHT as i32, 0..CHUNK_SIZE as i32)
}

fn any_pos() -> impl Strategy<Value = (i32, i32, i32)> {
    (-4i32..20, -4i32..260, -4i32..20)
}

proptest! {
    // Any voxel written at a valid position reads back unchanged
    #[test]
    fn write_read_round_trip((x, y, z) in local_pos(), ty in arb_type(), meta in any::<u8>()) {
        let mut c = Chunk::new(ChunkCoord::default());
        let v = Voxel::with_metadata(ty, meta);
        c.set_voxel(x, y, z, v);
        prop_assert_eq!(c.get_voxel(x, y, z), Some(v));
        // Writing the current value again leaves the dirty flag alone.
        c.set_mesh_data(Default::default());
        prop_assert!(!c.set_voxel(x, y, z, v));
        prop_assert!(!c.is_dirty());
    }

    // Writes and reads agree, and the running count matches a full recount
    #[test]
    fn writes_keep_emptiness_exact(ops in prop::collection::vec((any_pos(), arb_type()), 0..64)) {
        let mut c = Chunk::new(ChunkCoord::default());
        for ((x, y, z), ty) in &ops {
            let valid = Chunk::is_valid_position(*x, *y, *z);
            c.set_voxel_type(*x, *y, *z, *ty);
            if valid {
                prop_assert_eq!(c.voxel_type(*x, *y, *z), *ty);
            } else {
                prop_assert_eq!(c.get_voxel(*x, *y, *z), None);
            }
        }
        let tracked = c.non_air_count();
        c.update_empty_status();
        prop_assert_eq!(c.non_air_count(), tracked);
        prop_assert_eq!(c.is_empty(), c.voxels().iter().all(|v| v.is_air()));
    }

    // A changed voxel leaves the chunk dirty; an identical write leaves it clean
    #[test]
    fn dirty_flag_follows_changes((x, y, z) in local_pos(), ty in arb_type()) {
        let mut c = Chunk::new(ChunkCoord::default());
        c.set_mesh_data(Default::default());
        let changed = c.set_voxel_type(x, y, z, ty);
        prop_assert_eq!(changed, ty != VoxelType::Air);
        prop_assert_eq!(c.is_dirty(), changed);
    }

    // Storage index is unique and in range
    #[test]
    fn index_is_unique((x, y, z) in local_pos(), (a, b, d) in local_pos()) {
        let i = Chunk::index(x as usize, y as usize, z as usize);
        let j = Chunk::index(a as usize, b as usize, d as usize);
        prop_assert!(i < CHUNK_VOLUME);
        prop_assert_eq!(i == j, (x, y, z) == (a, b, d));
    }

    // Air never has a visible face, wherever it sits
    #[test]
    fn air_has_no_faces((x, y, z) in local_pos(), face_idx in 0usize..6) {
        let mut c = Chunk::new(ChunkCoord::default());
        c.fill_layer(y, VoxelType::Stone);
        c.set_voxel(x, y, z, Voxel::AIR);
        let face = VoxelFace::from_index(face_idx).unwrap();
        prop_assert!(!c.is_face_visible(x, y, z, face, &NoNeighbours));
    }
}

#[test]
fn enclosed_chunk_hides_every_side_face() {
    let mut store = ChunkStore::new();
    for (x, z) in [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)] {
        let mut c = Chunk::new(ChunkCoord::new(x, z));
        c.fill(VoxelType::Stone);
        store.insert(c).unwrap();
    }
    store.link_all();
    let centre = store.get_at(ChunkCoord::new(0, 0)).unwrap();
    for dir in Cardinal::ALL {
        assert!(centre.neighbour(dir).is_some(), "{dir:?} not linked");
    }

    let sides = [VoxelFace::Front, VoxelFace::Back, VoxelFace::Left, VoxelFace::Right];
    let s = CHUNK_SIZE as i32;
    let mut visible_sides = 0;
    for y in 0..CHUNK_HEIGHT as i32 {
        for z in 0..s {
            for x in 0..s {
                for face in sides {
                    if centre.is_face_visible(x, y, z, face, &store) {
                        visible_sides += 1;
                    }
                }
            }
        }
    }
    assert_eq!(visible_sides, 0);
    // The world floor and ceiling stay visible even when fully enclosed.
    assert!(centre.is_face_visible(3, 0, 3, VoxelFace::Bottom, &store));
    assert!(centre.is_face_visible(3, 255, 3, VoxelFace::Top, &store));
}

#[test]
fn boundary_face_uses_neighbour_edge_voxel() {
    let mut store = ChunkStore::new();
    let mut a = Chunk::new(ChunkCoord::new(0, 0));
    a.set_voxel_type(15, 10, 4, VoxelType::Stone);
    a.set_voxel_type(15, 11, 4, VoxelType::Stone);
    let a = store.insert(a).unwrap();

    let mut b = Chunk::new(ChunkCoord::new(1, 0));
    b.set_voxel_type(0, 10, 4, VoxelType::Dirt);
    b.set_voxel_type(0, 11, 4, VoxelType::Glass);
    store.insert(b).unwrap();

    let a_chunk = store.get(a).unwrap();
    // Before linking, the boundary is treated as open.
    assert!(a_chunk.is_face_visible(15, 10, 4, VoxelFace::Right, &store));

    store.link_neighbours(a);
    let a_chunk = store.get(a).unwrap();
    assert!(!a_chunk.is_face_visible(15, 10, 4, VoxelFace::Right, &store));
    assert!(a_chunk.is_face_visible(15, 11, 4, VoxelFace::Right, &store));
    // The isolated view ignores links.
    assert!(a_chunk.is_face_visible(15, 10, 4, VoxelFace::Right, &NoNeighbours));
}
