use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    concat::Concatenator,
    extract::SegmentExtractor,
    ffmpeg::{CommandRunner, ProcessRunner},
};

mod subclip_config;

pub use subclip_config::{ConfigBuilder, ConfigError, SubclipConfig};

#[derive(Debug)]
pub struct SubclipBuilder {
    pub config: subclip_config::ConfigBuilder,
}

impl SubclipBuilder {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(SubclipBuilder {
            config: subclip_config::ConfigBuilder::new()?.load_environment(true),
        })
    }

    pub fn update(
        self,
        f: impl FnOnce(
            subclip_config::ConfigBuilder,
        ) -> Result<subclip_config::ConfigBuilder, ConfigError>,
    ) -> Result<Self, ConfigError> {
        let SubclipBuilder {
            config: config_builder,
        } = self;
        let config_builder = f(config_builder)?;
        Ok(Self {
            config: config_builder,
        })
    }

    pub fn config_file(self, config_file: Option<&Path>) -> Result<Self, ConfigError> {
        self.update(|c| c.config_file(config_file))
    }

    pub fn build(self) -> Result<SubclipApp, ConfigError> {
        let config = self.config.build()?;
        let app = SubclipApp::new(config);
        log::trace!("{:#?}", app);
        Ok(app)
    }
}

/// Resolved configuration plus the thing that actually runs ffmpeg.
#[derive(Debug, Clone)]
pub struct SubclipApp {
    pub config: SubclipConfig,
    runner: Arc<dyn CommandRunner>,
}

impl SubclipApp {
    pub fn new(config: SubclipConfig) -> SubclipApp {
        SubclipApp::with_runner(config, Arc::new(ProcessRunner))
    }

    pub fn with_runner(config: SubclipConfig, runner: Arc<dyn CommandRunner>) -> SubclipApp {
        SubclipApp { config, runner }
    }

    pub fn runner(&self) -> Arc<dyn CommandRunner> {
        self.runner.clone()
    }

    pub fn extractor(&self, source: PathBuf) -> SegmentExtractor {
        SegmentExtractor::new(
            self.runner(),
            self.config.ffmpeg(),
            self.config.extract_settings(source),
        )
    }

    pub fn concatenator(&self) -> Concatenator {
        Concatenator::new(
            self.runner(),
            self.config.ffmpeg(),
            self.config.concat_manifest.clone(),
            self.config.final_video.clone(),
        )
    }
}
