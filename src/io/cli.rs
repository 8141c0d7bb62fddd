//! Command-line interface for rendering preset batches to PNG and GIF

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use tracing::{info, warn};

use crate::algorithm::anchors::Subject;
use crate::algorithm::compositor::{Composition, Compositor};
use crate::io::assets::{AssetRequests, FileLoader, load_or_fallback};
use crate::io::configuration::{
    MosaicConfig, OUTPUT_INFIX, REVEAL_FRAME_COUNT, REVEAL_FRAME_DELAY_MS, validate_contrast,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::export_png;
use crate::io::progress::ProgressManager;
use crate::io::render::{draw_guides, render_frame, render_layers};
use crate::io::visualization::RevealCapture;
use crate::presets::factory::{PresetFactory, item_seed};
use crate::presets::preset::Preset;
use crate::presets::ranges::FixedOverrides;
use crate::spatial::sprites::SpriteSet;

#[derive(Parser)]
#[command(name = "pixelbloom")]
#[command(
    author,
    version,
    about = "Render seeded bouquet mosaics dithered to a small palette"
)]
/// Command-line arguments for the mosaic renderer
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source image; a synthetic gradient is used when omitted or unreadable
    #[arg(value_name = "SOURCE")]
    pub source: Option<PathBuf>,

    /// JSON configuration document
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Top-level seed presets derive from
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Number of presets to derive
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Render only the preset with this index
    #[arg(short, long)]
    pub preset: Option<usize>,

    /// Sprite images for the bouquet (procedural flowers when none load)
    #[arg(long, num_args = 1..)]
    pub sprites: Vec<PathBuf>,

    /// Identity of the source image, used to anchor the bouquet
    #[arg(long, value_enum)]
    pub subject: Option<Subject>,

    /// Canvas width in pixels
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Mosaic cell size in pixels
    #[arg(long)]
    pub pixel_size: Option<u32>,

    /// Brightness offset
    #[arg(long, allow_hyphen_values = true)]
    pub brightness: Option<i32>,

    /// Contrast factor in [-255, 255]
    #[arg(long, allow_hyphen_values = true)]
    pub contrast: Option<f32>,

    /// Cells realized per frame
    #[arg(long)]
    pub max_cells: Option<usize>,

    /// Frames between draw-order reshuffles (0 = never)
    #[arg(long)]
    pub reshuffle_every: Option<u32>,

    /// Draw cells as circles instead of squares
    #[arg(short, long)]
    pub ellipses: bool,

    /// Skip the bouquet arrangement
    #[arg(long)]
    pub no_bouquet: bool,

    /// Foreground layer images sharing the cell budget
    #[arg(long = "layer", num_args = 1..)]
    pub layers: Vec<PathBuf>,

    /// Coverage floor for each layer when the budget is shared
    #[arg(long)]
    pub min_coverage: Option<f64>,

    /// Also export a progressive-reveal GIF per preset
    #[arg(short, long)]
    pub reveal: bool,

    /// Outline the arrangement guide ellipses on the output
    #[arg(short, long)]
    pub guides: bool,

    /// Print the derived presets as JSON and exit
    #[arg(long)]
    pub dump_presets: bool,

    /// Output directory
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet && !self.dump_presets
    }

    /// Overrides expressed by explicit flags
    pub fn overrides(&self) -> FixedOverrides {
        FixedOverrides {
            pixel_size: self.pixel_size,
            brightness: self.brightness,
            contrast: self.contrast,
            draw_as_rects: self.ellipses.then_some(false),
            max_cells: self.max_cells,
            reshuffle_every: self.reshuffle_every,
            subject: self.subject,
            source: self.source.clone(),
            sprites: (!self.sprites.is_empty()).then(|| self.sprites.clone()),
            bouquet: self.no_bouquet.then_some(false),
            ..FixedOverrides::default()
        }
    }

    /// Configuration with every explicit flag applied on top
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is invalid or a flag is out of range
    pub fn resolve_config(&self) -> Result<MosaicConfig> {
        let mut config = self
            .config
            .as_deref()
            .map_or_else(|| Ok(MosaicConfig::default()), MosaicConfig::from_json_file)?;

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(count) = self.count {
            config.preset_count = count;
        }
        if let Some(width) = self.width {
            config.canvas_width = width;
        }
        if let Some(height) = self.height {
            config.canvas_height = height;
        }
        if let Some(coverage) = self.min_coverage {
            config.min_coverage = coverage;
        }
        if let Some(contrast) = self.contrast {
            validate_contrast(contrast)?;
        }
        config.fixed = config.fixed.merged_with(&self.overrides());
        config.validate()?;
        Ok(config)
    }
}

/// Derives presets and renders each one to disk
pub struct MosaicProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl MosaicProcessor {
    /// Create a processor for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        Self {
            cli,
            progress_manager,
        }
    }

    /// Render every selected preset
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or output cannot be written
    pub fn process(&mut self) -> Result<()> {
        let config = self.cli.resolve_config()?;
        let factory = PresetFactory::new(config.ranges, config.fixed.clone());
        let presets = self.select_presets(&factory, &config)?;

        if self.cli.dump_presets {
            let json = serde_json::to_string_pretty(&presets)?;
            // Allow print for the requested JSON dump
            #[allow(clippy::print_stdout)]
            {
                println!("{json}");
            }
            return Ok(());
        }

        let compositor = Compositor::new(config.palette.clone(), config.canvas(), config.tuning);
        let requests = AssetRequests::new(FileLoader);

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(presets.len());
        }

        for (index, preset) in presets.iter().enumerate() {
            self.render_preset(index, preset, &compositor, &requests, config.min_coverage)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    fn select_presets(&self, factory: &PresetFactory, config: &MosaicConfig) -> Result<Vec<Preset>> {
        match self.cli.preset {
            Some(index) if index < config.preset_count => {
                Ok(vec![factory.preset(config.seed, index)])
            }
            Some(index) => Err(invalid_parameter(
                "preset",
                &index,
                &format!("only {} presets are derived", config.preset_count),
            )),
            None => Ok(factory.generate(config.seed, config.preset_count)),
        }
    }

    fn render_preset(
        &mut self,
        index: usize,
        preset: &Preset,
        compositor: &Compositor,
        requests: &AssetRequests<FileLoader>,
        min_coverage: f64,
    ) -> Result<()> {
        let start_time = Instant::now();
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_preset(index, &preset.name);
        }

        // A new preset supersedes anything still loading for the previous one
        requests.supersede();
        let source_task = preset.source.as_deref().map(|path| requests.request(path));
        let sprite_tasks = preset.sprites.iter().map(|p| requests.request(p)).collect();

        let source = source_task.map_or_else(
            || Some(load_or_fallback(&FileLoader, None)),
            |task| requests.resolve_source(task),
        );
        let sprites = requests.resolve_sprites(sprite_tasks);
        let (Some(source), Some(sprites)) = (source, sprites) else {
            return Ok(());
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, 1);
        }

        let composition = compositor.build(preset, &source, &sprites);
        let layers = self.build_layers(preset, compositor);
        let background = compositor.palette.background();

        let mut frame = if layers.is_empty() {
            render_frame(&composition, 0, background)
        } else {
            let mut stack: Vec<&Composition> = vec![&composition];
            stack.extend(layers.iter());
            render_layers(&stack, preset.max_cells, min_coverage, 0, background)
        };
        if self.cli.guides {
            let guide_color = compositor.palette.get(1).unwrap_or([255, 255, 255]);
            draw_guides(&mut frame, &composition, guide_color);
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.advance(index, 2);
        }

        let stem = Self::output_stem(preset.source.as_deref());
        let png_path = self.output_path(&stem, &preset.name, "png");
        export_png(&frame, &png_path)?;

        if self.cli.reveal && composition.order.is_empty() {
            warn!(preset = %preset.name, "nothing to reveal, skipping GIF");
        } else if self.cli.reveal {
            let capture = RevealCapture {
                frame_count: REVEAL_FRAME_COUNT,
                frame_delay_ms: REVEAL_FRAME_DELAY_MS,
            };
            let gif_path = self.output_path(&stem, &format!("{}_reveal", preset.name), "gif");
            capture.export_gif(&composition, background, &gif_path)?;
        }

        info!(
            preset = %preset.name,
            cells = composition.cells.len(),
            path = %png_path.display(),
            "preset rendered"
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_preset(index, start_time.elapsed());
        }

        Ok(())
    }

    fn build_layers(&self, preset: &Preset, compositor: &Compositor) -> Vec<Composition> {
        self.cli
            .layers
            .iter()
            .enumerate()
            .map(|(layer_index, path)| {
                let layer_preset = Preset {
                    name: format!("{}_layer{layer_index}", preset.name),
                    seed: item_seed(preset.seed, layer_index + 1),
                    source: Some(path.clone()),
                    bouquet: None,
                    ..preset.clone()
                };
                let source = load_or_fallback(&FileLoader, Some(path));
                compositor.build(&layer_preset, &source, &SpriteSet::default())
            })
            .collect()
    }

    fn output_stem(source: Option<&Path>) -> String {
        source
            .and_then(Path::file_stem)
            .map_or_else(|| "pixelbloom".to_string(), |s| s.to_string_lossy().to_string())
    }

    fn output_path(&self, stem: &str, name: &str, extension: &str) -> PathBuf {
        self.cli
            .output
            .join(format!("{stem}{OUTPUT_INFIX}{name}.{extension}"))
    }
}
