use clap::Parser;

use teapot_viewer::args::{Args, DEFAULT_BASE_COLOR_TEXTURE_PATH, DEFAULT_MESH_PATH};

/// A spinning, depth-tested teapot rendered with wgpu
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the .gltf or .glb file holding the mesh
    #[arg(long, default_value = DEFAULT_MESH_PATH)]
    pub mesh: String,

    /// Path to the base color image applied to the mesh
    #[arg(long, conflicts_with = "untextured")]
    pub texture: Option<String>,

    /// Draw the mesh in a flat placeholder color instead of texturing it
    #[arg(long)]
    pub untextured: bool,
}

impl From<Cli> for Args {
    fn from(value: Cli) -> Self {
        let base_color_texture = match value.untextured {
            true => None,
            false => Some(
                value
                    .texture
                    .unwrap_or_else(|| String::from(DEFAULT_BASE_COLOR_TEXTURE_PATH)),
            ),
        };

        Args {
            mesh: value.mesh,
            base_color_texture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_selects_the_bundled_resources() {
        let args: Args = Cli::try_parse_from(["teapot_viewer"]).unwrap().into();

        assert_eq!(args, Args::default());
    }

    #[test]
    fn overrides_replace_the_bundled_paths() {
        let args: Args = Cli::try_parse_from([
            "teapot_viewer",
            "--mesh",
            "models/kettle.glb",
            "--texture",
            "models/kettle.png",
        ])
        .unwrap()
        .into();

        assert_eq!(args.mesh, "models/kettle.glb");
        assert_eq!(args.base_color_texture.as_deref(), Some("models/kettle.png"));
    }

    #[test]
    fn untextured_drops_the_texture() {
        let args: Args = Cli::try_parse_from(["teapot_viewer", "--untextured"])
            .unwrap()
            .into();

        assert_eq!(args.mesh, DEFAULT_MESH_PATH);
        assert_eq!(args.base_color_texture, None);
    }

    #[test]
    fn texture_and_untextured_conflict() {
        let result =
            Cli::try_parse_from(["teapot_viewer", "--untextured", "--texture", "a.png"]);

        assert!(result.is_err());
    }
}
