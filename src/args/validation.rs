use std::path::Path;
use std::time::Duration;

use super::types::{Args, Config};
use crate::geometry::{TransformConfig, Viewport};

impl Args {
    /// Checks ranges and turns the raw flags into a [`Config`].
    ///
    /// # Errors
    ///
    /// Will return `Err` with a message naming the offending flag.
    pub fn validate(&self) -> Result<Config, String> {
        check_server_url(&self.server)?;
        check_positive("width", self.width)?;
        check_positive("height", self.height)?;
        check_positive("zoom", self.zoom)?;
        check_finite("rotation", self.rotation)?;
        check_finite("offset-x", self.offset_x)?;
        check_finite("offset-y", self.offset_y)?;
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err("padding must be zero or more.".to_string());
        }
        if self.padding * 2.0 >= self.width.min(self.height) {
            return Err("padding leaves no room to draw the course.".to_string());
        }
        if self.fps == 0 || self.fps > 240 {
            return Err("fps must be between 1 and 240.".to_string());
        }
        if self.evict_after == 0 {
            return Err("evict-after must be at least 1.".to_string());
        }
        let connect_timeout = match self.connect_timeout {
            Some(secs) => Some(
                Duration::try_from_secs_f64(secs)
                    .ok()
                    .filter(|d| !d.is_zero())
                    .ok_or_else(|| "connect-timeout must be a positive number of seconds.".to_string())?,
            ),
            None => None,
        };
        if let Some(path) = &self.frame_out {
            check_parent_dir_is_writeable(path)?;
        }

        Ok(Config {
            server: self.server.trim_end_matches('/').to_string(),
            viewport: Viewport::new(self.width, self.height),
            transform: TransformConfig {
                rotation_degrees: self.rotation,
                padding: self.padding,
                offset_x: self.offset_x,
                offset_y: self.offset_y,
                zoom: self.zoom,
            },
            fps: self.fps,
            frame_out: self.frame_out.clone(),
            bootstrap: !self.no_bootstrap,
            connect_timeout,
            evict_after: self.evict_after,
            ..Config::default()
        })
    }
}

/// # Errors
///
/// Will return `Err` unless `url` is a ws:// or wss:// url with a host.
pub fn check_server_url(url: &str) -> Result<(), String> {
    let rest = url
        .strip_prefix("ws://")
        .or_else(|| url.strip_prefix("wss://"))
        .ok_or_else(|| format!("The server url '{url}' must start with ws:// or wss://."))?;
    if rest.trim_matches('/').is_empty() {
        return Err(format!("The server url '{url}' has no host."));
    }
    Ok(())
}

fn check_positive(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(format!("{name} must be a positive number."))
    }
}

fn check_finite(name: &str, value: f64) -> Result<(), String> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(format!("{name} must be a finite number."))
    }
}

/// # Errors
///
/// Will return `Err` if the directory `path` would be written into does not
/// exist or is read-only.
pub fn check_parent_dir_is_writeable(path: &Path) -> Result<(), String> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match std::fs::metadata(parent) {
        Ok(meta) if meta.is_dir() && !meta.permissions().readonly() => Ok(()),
        _ => Err(format!(
            "The frame output directory '{}' is not writeable.",
            parent.display()
        )),
    }
}
