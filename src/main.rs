//! `MaveCaptcha` - Image CAPTCHA generator.
//!
//! Copyright (C) 2026 Maverick
//! SPDX-License-Identifier: AGPL-3.0-only
//!
//! Loads configuration, sets up logging, and emits generated challenges as
//! JSON lines on stdout. Logs go to stderr.

use mavecaptcha::render::encoder::decode_data_uri;
use mavecaptcha::{Captcha, CaptchaGenerator, Config};

use std::error::Error;
use std::fs;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    dotenvy::dotenv().ok();

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(non_blocking);

    if log_format.eq_ignore_ascii_case("pretty") {
        subscriber.init();
    } else {
        subscriber.json().init();
    }

    let config = Config::from_env();
    info!(
        count = config.count,
        font = ?config.font_source(),
        output_dir = ?config.output_dir,
        log_format = %config.log_format,
        "Generator initialized"
    );

    if let Err(e) = run(&config) {
        error!(error = %e, "Captcha generation failed");
        drop(guard);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let generator = CaptchaGenerator::from_source(config.font_source());

    if let Some(dir) = &config.output_dir {
        fs::create_dir_all(dir)?;
    }

    for index in 0..config.count {
        let captcha = generator.generate(&config.options)?;
        println!("{}", serde_json::to_string(&captcha)?);

        if let Some(dir) = &config.output_dir {
            write_png(dir, index, &captcha)?;
        }
    }

    let stats = generator.fonts().stats();
    info!(
        generated = config.count,
        font_hits = stats.hits,
        font_loads = stats.loads,
        "Generation complete"
    );

    Ok(())
}

fn write_png(dir: &Path, index: usize, captcha: &Captcha) -> Result<(), Box<dyn Error>> {
    let png = decode_data_uri(captcha.image_reference()).ok_or("malformed image data URI")?;
    let name = if captcha.identifier().is_empty() {
        index.to_string()
    } else {
        captcha.identifier().to_string()
    };

    let path = dir.join(format!("{name}.png"));
    fs::write(&path, png)?;
    info!(path = %path.display(), "Captcha image written");
    Ok(())
}
