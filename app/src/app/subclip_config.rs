use std::path::{Path, PathBuf};

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use subclip_core::{
    edl::{EdlSettings, RecordMode, DEFAULT_REEL, DEFAULT_TITLE},
    timecode::DEFAULT_FRAME_RATE,
    FrameRate, PlaceholderRule,
};

use crate::{extract::ExtractSettings, ffmpeg::FFMpegBinary};

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "subclip";
const APP: &str = "subclip";
const APP_CAPS: &str = "SUBCLIP";

const SOURCE_VIDEO_KEY: &str = "source_video";
const SUBTITLES_KEY: &str = "subtitles";

const OUTPUT_DIR_KEY: &str = "output_dir";
const DEFAULT_OUTPUT_DIR: &str = "segments";
const EXTENSION_KEY: &str = "extension";
const DEFAULT_EXTENSION: &str = "mov";

const FRAME_RATE_KEY: &str = "frame_rate";
const PLACEHOLDER_KEY: &str = "placeholder";
const JOBS_KEY: &str = "jobs";
const FFMPEG_CMD_KEY: &str = "ffmpeg";

const EDL_PATH_KEY: &str = "edl_path";
const DEFAULT_EDL_PATH: &str = "segments.edl";
const EDL_TITLE_KEY: &str = "edl_title";
const REEL_KEY: &str = "reel";
const RECORD_MODE_KEY: &str = "record_mode";

const CONCAT_MANIFEST_KEY: &str = "concat_manifest";
const DEFAULT_CONCAT_MANIFEST: &str = "concat_list.txt";
const FINAL_VIDEO_KEY: &str = "final_video";
const DEFAULT_FINAL_VIDEO: &str = "final_video.mov";

const DEFAULT_CONFIG_FILE: &str = "subclip.toml";

type ExtConfigBuilder = config::ConfigBuilder<config::builder::DefaultState>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    ConfigError(#[from] config::ConfigError),
    #[error("unable to get user home directory")]
    NoUserHome,
    #[error("path is not utf8: {:?}", _0)]
    NonUtf8Path(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config_dir: Option<Utf8PathBuf>,
    config_path: Option<Utf8PathBuf>,
    load_environment: bool,
    config_builder: ExtConfigBuilder,
}

fn camino_path(std_path: &Path) -> Result<&Utf8Path, ConfigError> {
    Utf8Path::from_path(std_path).ok_or_else(|| ConfigError::NonUtf8Path(std_path.to_path_buf()))
}

fn new_config_builder() -> Result<ExtConfigBuilder, ConfigError> {
    let builder = config::Config::builder()
        .set_default(SOURCE_VIDEO_KEY, Option::<&str>::None)?
        .set_default(SUBTITLES_KEY, Option::<&str>::None)?
        .set_default(OUTPUT_DIR_KEY, DEFAULT_OUTPUT_DIR)?
        .set_default(EXTENSION_KEY, DEFAULT_EXTENSION)?
        .set_default(FRAME_RATE_KEY, i64::from(DEFAULT_FRAME_RATE))?
        .set_default(PLACEHOLDER_KEY, "hour_minute")?
        .set_default(JOBS_KEY, 1i64)?
        .set_default(FFMPEG_CMD_KEY, Option::<&str>::None)?
        .set_default(EDL_PATH_KEY, DEFAULT_EDL_PATH)?
        .set_default(EDL_TITLE_KEY, DEFAULT_TITLE)?
        .set_default(REEL_KEY, DEFAULT_REEL)?
        .set_default(RECORD_MODE_KEY, "source")?
        .set_default(CONCAT_MANIFEST_KEY, DEFAULT_CONCAT_MANIFEST)?
        .set_default(FINAL_VIDEO_KEY, DEFAULT_FINAL_VIDEO)?;
    Ok(builder)
}

impl ConfigBuilder {
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = directories::ProjectDirs::from(QUALIFIER, ORGANIZATION, APP)
            .ok_or(ConfigError::NoUserHome)?;
        let config_dir = camino_path(dirs.config_dir())?.to_path_buf();
        Ok(Self {
            load_environment: false,
            config_path: None,
            config_dir: Some(config_dir),
            config_builder: new_config_builder()?,
        })
    }

    /// A builder that never looks at the user's config directory.
    pub fn isolated() -> Result<Self, ConfigError> {
        Ok(Self {
            load_environment: false,
            config_path: None,
            config_dir: None,
            config_builder: new_config_builder()?,
        })
    }

    /// Should we load configuration from the environment?
    pub fn load_environment(mut self, load_environment: bool) -> Self {
        self.load_environment = load_environment;
        self
    }

    pub fn config_file(mut self, config_file: Option<&Path>) -> Result<Self, ConfigError> {
        self.config_path = config_file
            .map(|p| camino_path(p).map(|p| p.to_path_buf()))
            .transpose()?;
        Ok(self)
    }

    fn set_override<V: Into<config::Value>>(
        mut self,
        key: &str,
        value: Option<V>,
    ) -> Result<Self, ConfigError> {
        self.config_builder = self.config_builder.set_override_option(key, value)?;
        Ok(self)
    }

    fn set_path_override(self, key: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        let path_override = path.map(camino_path).transpose()?;
        self.set_override(key, path_override.map(|c| c.as_str()))
    }

    pub fn source_video(self, path: Option<&Path>) -> Result<Self, ConfigError> {
        self.set_path_override(SOURCE_VIDEO_KEY, path)
    }

    pub fn subtitles(self, path: Option<&Path>) -> Result<Self, ConfigError> {
        self.set_path_override(SUBTITLES_KEY, path)
    }

    pub fn output_dir(self, path: Option<&Path>) -> Result<Self, ConfigError> {
        self.set_path_override(OUTPUT_DIR_KEY, path)
    }

    pub fn extension(self, extension: Option<&str>) -> Result<Self, ConfigError> {
        self.set_override(EXTENSION_KEY, extension)
    }

    pub fn frame_rate(self, fps: Option<u32>) -> Result<Self, ConfigError> {
        self.set_override(FRAME_RATE_KEY, fps.map(i64::from))
    }

    /// Takes the serialized name, `hour_minute`, `hour_minute_millis` or `keep`.
    pub fn placeholder(self, rule: Option<&str>) -> Result<Self, ConfigError> {
        self.set_override(PLACEHOLDER_KEY, rule)
    }

    pub fn jobs(self, jobs: Option<usize>) -> Result<Self, ConfigError> {
        self.set_override(JOBS_KEY, jobs.map(|j| j as i64))
    }

    pub fn ffmpeg_override(self, ffmpeg: Option<&Path>) -> Result<Self, ConfigError> {
        self.set_path_override(FFMPEG_CMD_KEY, ffmpeg)
    }

    pub fn edl_path(self, path: Option<&Path>) -> Result<Self, ConfigError> {
        self.set_path_override(EDL_PATH_KEY, path)
    }

    pub fn edl_title(self, title: Option<&str>) -> Result<Self, ConfigError> {
        self.set_override(EDL_TITLE_KEY, title)
    }

    pub fn reel(self, reel: Option<&str>) -> Result<Self, ConfigError> {
        self.set_override(REEL_KEY, reel)
    }

    /// Takes the serialized name, `source` or `timeline`.
    pub fn record_mode(self, mode: Option<&str>) -> Result<Self, ConfigError> {
        self.set_override(RECORD_MODE_KEY, mode)
    }

    pub fn concat_manifest(self, path: Option<&Path>) -> Result<Self, ConfigError> {
        self.set_path_override(CONCAT_MANIFEST_KEY, path)
    }

    pub fn final_video(self, path: Option<&Path>) -> Result<Self, ConfigError> {
        self.set_path_override(FINAL_VIDEO_KEY, path)
    }

    pub fn build(mut self) -> Result<SubclipConfig, ConfigError> {
        let cfg_file = self
            .config_path
            .or_else(|| self.config_dir.map(|d| d.join(DEFAULT_CONFIG_FILE)));

        if let Some(cfg_file) = cfg_file {
            if cfg_file.exists() {
                log::debug!("loading config file {}", cfg_file);
                self.config_builder = self
                    .config_builder
                    .add_source(config::File::from(cfg_file.as_std_path()));
            } else {
                log::trace!("no config file at {}", cfg_file);
            }
        }

        // values stay strings: a reel of `001` must not become the integer 1
        if self.load_environment {
            self.config_builder = self
                .config_builder
                .add_source(config::Environment::with_prefix(APP_CAPS))
        }

        let subclip_cfg: SubclipConfig = self.config_builder.build()?.try_deserialize()?;
        log::debug!("{:#?}", subclip_cfg);
        Ok(subclip_cfg)
    }
}

/// Everything a run needs to know, resolved from every configuration layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubclipConfig {
    pub source_video: Option<PathBuf>,
    pub subtitles: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub extension: String,
    pub frame_rate: FrameRate,
    pub placeholder: PlaceholderRule,
    pub jobs: usize,
    pub ffmpeg: Option<PathBuf>,
    pub edl_path: PathBuf,
    pub edl_title: String,
    pub reel: String,
    pub record_mode: RecordMode,
    pub concat_manifest: PathBuf,
    pub final_video: PathBuf,
}

impl SubclipConfig {
    pub fn ffmpeg(&self) -> FFMpegBinary {
        FFMpegBinary::from(self.ffmpeg.clone())
    }

    /// Extraction settings for cutting `source`, normally the checked
    /// `source_video`.
    pub fn extract_settings(&self, source: PathBuf) -> ExtractSettings {
        ExtractSettings {
            source,
            output_dir: self.output_dir.clone(),
            extension: self.extension.clone(),
            jobs: self.jobs,
        }
    }

    pub fn edl_settings(&self) -> EdlSettings {
        EdlSettings {
            title: self.edl_title.clone(),
            reel: self.reel.clone(),
            frame_rate: self.frame_rate,
            record_mode: self.record_mode,
        }
    }
}
