use {
    eyre::WrapErr,
    std::convert::TryFrom,
    tracing_subscriber::{fmt, prelude::*, EnvFilter},
    uniform_block::{
        mat4, vec2, vec3, BlockWriter, Item, Shape, UniformBlock, UniformSink, WriteError,
    },
};

#[derive(serde::Deserialize)]
struct Layouts {
    camera: Shape,
    lights: Shape,
}

/// Stands in for a GPU buffer bound at `binding`.
struct LoggingSink {
    binding: u32,
}

impl UniformSink for LoggingSink {
    fn upload(&mut self, bytes: &[u8]) {
        tracing::info!("Upload {} bytes to binding {}", bytes.len(), self.binding);
    }
}

struct PointLight {
    position: [f32; 3],
    color: [f32; 3],
}

const POINT_LIGHTS: [PointLight; 3] = [
    PointLight {
        position: [2.0, 1.0, 0.0],
        color: [1.0, 0.6, 0.2],
    },
    PointLight {
        position: [-2.0, 1.0, 0.0],
        color: [0.2, 0.6, 1.0],
    },
    PointLight {
        position: [0.0, 3.0, -4.0],
        color: [1.0, 1.0, 1.0],
    },
];

fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_error::ErrorLayer::default())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/blocks.ron").to_owned());

    let source = std::fs::read_to_string(&path).wrap_err_with(|| format!("Failed to read {}", path))?;
    let layouts: Layouts = ron::from_str(&source).wrap_err_with(|| format!("Failed to parse {}", path))?;

    let mut camera = UniformBlock::new("camera", 0, Item::try_from(layouts.camera)?)?;
    let mut lights = UniformBlock::new("lights", 1, Item::try_from(layouts.lights)?)?;

    let mut camera_sink = LoggingSink {
        binding: camera.binding(),
    };
    let mut lights_sink = LoggingSink {
        binding: lights.binding(),
    };

    camera.update(&mut camera_sink, write_camera)?;
    lights.update(&mut lights_sink, write_lights)?;

    dump(&camera);
    dump(&lights);

    Ok(())
}

fn write_camera(w: &mut BlockWriter<'_>) -> Result<(), WriteError> {
    let view = mat4::from([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, -2.0, -10.0, 1.0],
    ]);
    let projection = mat4::from([
        [1.35, 0.0, 0.0, 0.0],
        [0.0, 2.41, 0.0, 0.0],
        [0.0, 0.0, -1.0, -1.0],
        [0.0, 0.0, -0.2, 0.0],
    ]);

    w.write_vec3(vec3::from([0.0, 2.0, 10.0]))?;
    w.write_vec2(vec2::from([1280.0, 720.0]))?;
    w.write_mat4(&view)?;
    w.write_mat4(&projection)?;
    w.write_mat4(&mat4::identity())?;
    w.write_mat4(&mat4::identity())
}

fn write_lights(w: &mut BlockWriter<'_>) -> Result<(), WriteError> {
    w.write_vec3(vec3::from([-0.3, -1.0, -0.2]))?;
    w.write_vec3(vec3::from([0.05, 0.05, 0.05]))?;
    w.write_vec3(vec3::from([0.6, 0.6, 0.6]))?;
    w.write_vec3(vec3::from([1.0, 1.0, 1.0]))?;
    w.write_int(POINT_LIGHTS.len() as i32)?;

    for light in &POINT_LIGHTS {
        w.write_vec3(vec3::from(light.position))?;
        w.write_vec3(vec3::from(light.color.map(|c| c * 0.1)))?;
        w.write_vec3(vec3::from(light.color))?;
        w.write_vec3(vec3::from([1.0, 1.0, 1.0]))?;
        w.write_float(1.0)?;
        w.write_float(0.09)?;
        w.write_float(0.032)?;
    }

    let capacity = w.layout().child(2).map_or(0, Item::length);
    let skipped = w.advance_array(capacity.saturating_sub(POINT_LIGHTS.len() as u32))?;
    tracing::debug!("Skipped {} unused point lights", skipped);
    Ok(())
}

fn dump(block: &UniformBlock) {
    tracing::info!(
        "Block '{}' at binding {}, {} bytes",
        block.name(),
        block.binding(),
        block.size()
    );

    for (offset, item, bytes) in block.read_leaves() {
        let words: Vec<String> = bytes
            .chunks_exact(4)
            .map(|w| format!("{:08x}", u32::from_le_bytes([w[0], w[1], w[2], w[3]])))
            .collect();
        tracing::info!(
            "  {:>4} {:<10} {}",
            offset,
            item.name().unwrap_or("-"),
            words.join(" ")
        );
    }
}
