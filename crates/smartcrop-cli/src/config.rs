//! CLI configuration: environment first, flags on top.

use smartcrop_media::SmartCropConfig;
use smartcrop_ml_client::MlClientConfig;

use crate::args::EngineArgs;

/// Everything the CLI needs to build a cropper.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    pub engine: SmartCropConfig,
    pub services: MlClientConfig,
}

impl CliConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            engine: SmartCropConfig::from_env(),
            services: MlClientConfig::from_env(),
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, args: &EngineArgs) -> Self {
        if let Some(fps) = args.fps {
            self.engine.frames_per_second = fps;
        }
        if let Some(work_dir) = &args.work_dir {
            self.engine.work_dir = work_dir.clone();
        }
        self
    }
}
