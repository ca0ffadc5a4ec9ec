use uniform_block::{mat4, vec2, vec3, BlockWriter, Item, UniformBlock, WriteError};

const MAX_POINT_LIGHTS: u32 = 8;

fn vector(width: u32) -> Item {
    Item::vector(width).unwrap()
}

fn lights_layout() -> Item {
    let main_light = Item::structure([
        vector(3).named("direction"),
        vector(3).named("ambient"),
        vector(3).named("diffuse"),
        vector(3).named("specular"),
    ])
    .unwrap();

    let point_light = Item::structure([
        vector(3).named("position"),
        vector(3).named("ambient"),
        vector(3).named("diffuse"),
        vector(3).named("specular"),
        Item::scalar().named("constant"),
        Item::scalar().named("linear"),
        Item::scalar().named("quadratic"),
    ])
    .unwrap();

    Item::structure([
        main_light.named("main"),
        Item::scalar().named("count"),
        Item::array(MAX_POINT_LIGHTS, point_light)
            .unwrap()
            .named("points"),
    ])
    .unwrap()
}

fn camera_layout() -> Item {
    Item::structure([
        vector(3).named("position"),
        vector(2).named("viewport"),
        Item::column_matrix(4, 4).unwrap().named("view"),
        Item::column_matrix(4, 4).unwrap().named("projection"),
        Item::column_matrix(4, 4).unwrap().named("view_projection"),
        Item::column_matrix(4, 4).unwrap().named("view_rotation"),
    ])
    .unwrap()
}

fn read_vec3(bytes: &[u8], offset: u32) -> [f32; 3] {
    let offset = offset as usize;
    let mut out = [0.0; 3];
    for (i, value) in out.iter_mut().enumerate() {
        let start = offset + i * 4;
        *value = f32::from_le_bytes(bytes[start..start + 4].try_into().unwrap());
    }
    out
}

fn read_f32(bytes: &[u8], offset: u32) -> f32 {
    let offset = offset as usize;
    f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn read_i32(bytes: &[u8], offset: u32) -> i32 {
    let offset = offset as usize;
    i32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

fn write_point_light(writer: &mut BlockWriter<'_>, seed: f32) -> Result<(), WriteError> {
    writer.write_vec3(vec3::from([seed, seed + 1.0, seed + 2.0]))?;
    writer.write_vec3(vec3::from([0.1, 0.1, 0.1]))?;
    writer.write_vec3(vec3::from([0.5, 0.5, 0.5]))?;
    writer.write_vec3(vec3::from([1.0, 1.0, 1.0]))?;
    writer.write_float(1.0)?;
    writer.write_float(0.09)?;
    writer.write_float(0.032)
}

#[test]
fn lights_layout_size() {
    let layout = lights_layout();

    assert_eq!(layout.member_offsets(), [0, 64, 80]);
    assert_eq!(layout.member_offset("points"), Some(80));

    let points = layout.child(2).unwrap();
    assert_eq!(points.stride(), Some(80));
    assert_eq!(points.size(), 640);

    assert_eq!(layout.size(), 64 + 16 + 640);
}

#[test]
fn two_lights_then_skip_the_rest() {
    let mut block = UniformBlock::new("lights", 1, lights_layout()).unwrap();
    let mut sink = Vec::<u8>::new();

    let uploaded = block
        .update(&mut sink, |w| {
            w.write_vec3(vec3::from([0.0, -1.0, 0.0]))?;
            w.write_vec3(vec3::from([0.2, 0.2, 0.2]))?;
            w.write_vec3(vec3::from([0.8, 0.8, 0.8]))?;
            w.write_vec3(vec3::from([1.0, 1.0, 1.0]))?;
            w.write_int(2)?;

            write_point_light(w, 10.0)?;
            write_point_light(w, 20.0)?;

            assert_eq!(w.advance_array(MAX_POINT_LIGHTS - 2)?, 6);
            assert_eq!(w.position(), 720);
            Ok(())
        })
        .unwrap();

    assert_eq!(uploaded, 720);
    assert_eq!(sink.len(), block.size() as usize);

    assert_eq!(read_vec3(&sink, 0), [0.0, -1.0, 0.0]);
    assert_eq!(read_vec3(&sink, 48), [1.0, 1.0, 1.0]);
    assert_eq!(read_i32(&sink, 64), 2);

    assert_eq!(read_vec3(&sink, 80), [10.0, 11.0, 12.0]);
    assert_eq!(read_f32(&sink, 80 + 68), 0.032);
    assert_eq!(read_vec3(&sink, 160), [20.0, 21.0, 22.0]);

    assert!(sink[240..].iter().all(|&b| b == 0));
}

#[test]
fn skip_and_write_agree_with_writing_everything() {
    let layout = lights_layout();

    for skipped in 0..=MAX_POINT_LIGHTS {
        let mut all = vec![0u8; layout.size() as usize];
        let end_all = {
            let mut writer = BlockWriter::new(&layout, &mut all).unwrap();
            writer.write_begin();
            writer.advance_cursor(5).unwrap();
            for i in 0..MAX_POINT_LIGHTS {
                write_point_light(&mut writer, i as f32).unwrap();
            }
            writer.position()
        };

        let mut tail = vec![0u8; layout.size() as usize];
        let end_tail = {
            let mut writer = BlockWriter::new(&layout, &mut tail).unwrap();
            writer.write_begin();
            writer.advance_cursor(5).unwrap();
            assert_eq!(writer.advance_array(skipped), Ok(skipped));
            for i in skipped..MAX_POINT_LIGHTS {
                write_point_light(&mut writer, i as f32).unwrap();
            }
            writer.position()
        };

        assert_eq!(end_tail, end_all, "skipped {}", skipped);
        assert_eq!(end_tail, layout.size());

        let from = (80 + 80 * skipped) as usize;
        assert_eq!(all[from..], tail[from..]);
    }
}

#[test]
fn camera_round_trip() {
    let mut block = UniformBlock::new("camera", 0, camera_layout()).unwrap();
    assert_eq!(block.size(), 288);

    let view = mat4::from([
        [1.0, 2.0, 3.0, 4.0],
        [5.0, 6.0, 7.0, 8.0],
        [9.0, 10.0, 11.0, 12.0],
        [13.0, 14.0, 15.0, 16.0],
    ]);

    let mut sink = Vec::<u8>::new();
    block
        .update(&mut sink, |w| {
            w.write_vec3(vec3::from([1.0, 2.0, 3.0]))?;
            w.write_vec2(vec2::from([1280.0, 720.0]))?;
            w.write_mat4(&view)?;
            w.write_mat4(&mat4::identity())?;
            w.write_mat4(&view)?;
            w.write_mat4(&mat4::identity())
        })
        .unwrap();

    let mut expected = vec![1.0, 2.0, 3.0, 1280.0, 720.0];
    for m in [&view, &mat4::identity(), &view, &mat4::identity()] {
        for column in &m.0 {
            expected.extend_from_slice(&column.0);
        }
    }

    let read: Vec<f32> = block
        .read_leaves()
        .flat_map(|(_, _, bytes)| {
            bytes
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect::<Vec<_>>()
        })
        .collect();

    assert_eq!(read, expected);
    assert_eq!(sink, block.bytes());
}

#[test]
fn repeated_begin_leaves_no_residue() {
    let layout = camera_layout();
    let mut bytes = vec![0u8; layout.size() as usize];
    let mut writer = BlockWriter::new(&layout, &mut bytes).unwrap();

    writer.write_begin();
    writer.write_begin();
    let fresh = (writer.position(), writer.bytes().to_vec());

    writer.write_vec3(vec3::from([9.0, 9.0, 9.0])).unwrap();
    writer.write_vec2(vec2::from([9.0, 9.0])).unwrap();

    writer.write_begin();
    assert_eq!((writer.position(), writer.bytes().to_vec()), fresh);
}

#[test]
fn writes_past_the_last_leaf_fail() {
    let layout = Item::structure([vector(4), Item::array(2, Item::scalar()).unwrap()]).unwrap();
    let mut bytes = vec![0u8; layout.size() as usize];
    let mut writer = BlockWriter::new(&layout, &mut bytes).unwrap();

    writer.write_begin();
    writer.advance_cursor(3).unwrap();
    assert_eq!(writer.position(), layout.size());

    assert_eq!(writer.write_float(1.0), Err(WriteError::ExhaustedLayout));
    assert_eq!(writer.advance_cursor(1), Err(WriteError::ExhaustedLayout));
    assert_eq!(writer.position(), layout.size());
}
