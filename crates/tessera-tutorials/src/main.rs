//! Tessera tutorials
//!
//! Small wgpu programs running on the tessera frame presenter.
//!
//! # Usage
//!
//! ```bash
//! tessera-tutorials triangle-msaa
//! tessera-tutorials polygon --width 1024 --height 768
//! WGPU_FORCE_FALLBACK_ADAPTER=1 tessera-tutorials textured
//! tessera-tutorials camera --wgpu-log-level warn
//! ```
//!
//! # Keyboard Shortcuts
//!
//! - ESC: Quit
//! - R: Log the wgpu resource report
//! - Space: Hold to switch geometry (polygon) or texture (textured)
//! - WASD / arrows: Move the camera (camera)

mod demos;

use std::process::ExitCode;

use clap::builder::FalseyValueParser;
use clap::{Parser, ValueEnum};

use tessera_engine::device::GpuInit;
use tessera_engine::logging::{LoggingConfig, init_logging};
use tessera_engine::window::{LogicalSize, Runtime, RuntimeConfig};

use demos::{CameraDemo, PolygonDemo, TexturedDemo, TriangleMsaa};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    /// 4x multisampled triangle
    TriangleMsaa,
    /// Colored pentagon; hold Space for a 100-sided polygon
    Polygon,
    /// Textured pentagon; hold Space to swap textures
    Textured,
    /// Rotating textured pentagon with a WASD camera and depth buffer
    Camera,
}

impl Demo {
    fn title(self) -> &'static str {
        match self {
            Self::TriangleMsaa => "tessera: triangle-msaa",
            Self::Polygon => "tessera: polygon",
            Self::Textured => "tessera: textured",
            Self::Camera => "tessera: camera",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "tessera-tutorials")]
#[command(author, version, about = "wgpu tutorial programs on a resize-safe frame presenter")]
struct Cli {
    /// Program to run
    #[arg(value_enum)]
    demo: Demo,

    /// Initial window width in logical pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// Use the software fallback adapter (env: any value but 0/false/no/off/empty)
    #[arg(
        long,
        env = "WGPU_FORCE_FALLBACK_ADAPTER",
        value_parser = FalseyValueParser::new()
    )]
    force_fallback_adapter: bool,

    /// Log filter in env_logger syntax (overrides RUST_LOG)
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,

    /// Level cap for wgpu's own logging (off, error, warn, info, debug, trace)
    ///
    /// Unknown levels are ignored with a warning.
    #[arg(long, env = "WGPU_LOG_LEVEL", value_name = "LEVEL")]
    wgpu_log_level: Option<String>,
}

impl Cli {
    fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            env_filter: self.log.clone(),
            wgpu_level: self.wgpu_level(),
            ..Default::default()
        }
    }

    /// Parsed wgpu level cap; `None` when unset or unrecognized.
    fn wgpu_level(&self) -> Option<log::LevelFilter> {
        self.wgpu_log_level.as_deref()?.trim().parse().ok()
    }

    /// Level string that was given but could not be parsed.
    fn rejected_wgpu_level(&self) -> Option<&str> {
        self.wgpu_log_level
            .as_deref()
            .filter(|_| self.wgpu_level().is_none())
    }

    fn gpu_init(&self) -> GpuInit {
        GpuInit {
            force_fallback_adapter: self.force_fallback_adapter,
            ..Default::default()
        }
    }

    fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            title: self.demo.title().to_string(),
            initial_size: logical(self.width, self.height),
        }
    }
}

fn logical(width: u32, height: u32) -> LogicalSize<f64> {
    LogicalSize::new(f64::from(width.max(1)), f64::from(height.max(1)))
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let (config, init) = (cli.runtime(), cli.gpu_init());

    match cli.demo {
        Demo::TriangleMsaa => Runtime::run(config, init, TriangleMsaa::new),
        Demo::Polygon => Runtime::run(config, init, PolygonDemo::new),
        Demo::Textured => Runtime::run(config, init, TexturedDemo::new),
        Demo::Camera => Runtime::run(config, init, CameraDemo::new),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.logging());

    if let Some(level) = cli.rejected_wgpu_level() {
        log::warn!("unknown wgpu log level {level:?}; keeping wgpu's default");
    }

    log::info!("starting {:?}", cli.demo);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{:?} exited with error: {err:#}", cli.demo);
            ExitCode::FAILURE
        }
    }
}
