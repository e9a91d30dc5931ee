use anyhow::{Context, Result, anyhow, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use trdg_config::TrdgConfig;
use trdg_text::{
    Alignment, BoundingBox, ColorSpec, FontCache, FontSet, FrameOptions, Margins,
    MissingGlyphStrategy, Orientation, RenderOptions, ScaledFont, char_bounding_boxes,
    find_system_font, generate, place,
};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1).collect::<Vec<_>>();
    let mut config_path: Option<PathBuf> = None;
    let mut input: Option<PathBuf> = None;
    let mut strings: Vec<String> = Vec::new();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                if i + 1 >= args.len() {
                    bail!("--config expects a path");
                }
                config_path = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--input" => {
                if i + 1 >= args.len() {
                    bail!("--input expects a path");
                }
                input = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            _ => {
                strings.push(std::mem::take(&mut args[i]));
                i += 1;
            }
        }
    }

    if let Some(path) = &input {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        strings.extend(content.lines().filter(|l| !l.is_empty()).map(str::to_string));
    }
    if strings.is_empty() {
        eprintln!("Usage: trdg [--config <trdg.toml>] [--input <lines.txt>] <text> ...");
        bail!("no input strings");
    }

    let mut config = match &config_path {
        Some(path) => TrdgConfig::load_from_file(path).map_err(|e| anyhow!(e))?,
        None => TrdgConfig::load_or_default(),
    };
    config.merge_with_env();

    let options = render_options(&config)?;
    let frame = FrameOptions {
        width: u32::try_from(config.output.width).ok().filter(|&w| w > 0),
        margins: Margins::from(config.output.margins),
        alignment: options.effective_alignment(),
    };
    let strategy = config
        .fonts
        .missing_glyph_strategy
        .parse::<MissingGlyphStrategy>()
        .unwrap_or_default();

    let mut cache = FontCache::new();
    let size = config.fonts.size as f32;
    let primaries = load_primary_fonts(&mut cache, &config.fonts.primary, size)?;
    let fallback = config
        .fonts
        .fallback
        .as_ref()
        .map(|path| cache.scaled(path, size))
        .transpose()
        .context("failed to load fallback font")?;

    let mut rng = match config.output.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let out_dir = &config.output.dir;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let mut labels = String::new();
    for (index, text) in strings.iter().enumerate() {
        let primary = &primaries[index % primaries.len()];
        let mut fonts = FontSet::new(primary).with_strategy(strategy);
        if let Some(fallback) = &fallback {
            fonts = fonts.with_fallback(fallback);
        }

        let rendered = generate(text, &fonts, &options, &mut rng)
            .with_context(|| format!("failed to render string {index}"))?;
        let (image, mask) = place(&rendered.image, &rendered.mask, &frame);

        let image_path = out_dir.join(format!("{index}.png"));
        image
            .save(&image_path)
            .with_context(|| format!("failed to write {}", image_path.display()))?;
        if config.output.mask {
            let mask_path = out_dir.join(format!("{index}_mask.png"));
            mask.save(&mask_path)
                .with_context(|| format!("failed to write {}", mask_path.display()))?;
        }
        if config.output.bboxes {
            let decoded = char_bounding_boxes(&mask, rendered.glyph_count as usize);
            write_text(
                &out_dir.join(format!("{index}_boxes.txt")),
                &box_lines(&decoded),
            )?;
        }

        log::info!("{index}.png: {} glyph(s)", rendered.glyph_count);
        labels.push_str(&label_line(index, &rendered.label));
    }

    write_text(&out_dir.join("labels.txt"), &labels)?;
    Ok(())
}

fn render_options(config: &TrdgConfig) -> Result<RenderOptions> {
    let text = &config.text;
    Ok(RenderOptions {
        orientation: Orientation::try_from(text.orientation)?,
        space_width: text.space_width,
        character_spacing: text.character_spacing,
        alignment: Alignment::from(text.alignment),
        word_split: text.word_split,
        fit: text.fit,
        stroke_width: text.stroke_width,
        text_color: ColorSpec::parse(&text.text_color)?,
        stroke_fill: ColorSpec::parse(&text.stroke_fill)?,
        rtl: text.rtl,
        language: text.language.clone(),
        max_line_length: text.max_line_length,
    })
}

fn load_primary_fonts(cache: &mut FontCache, paths: &[PathBuf], size: f32) -> Result<Vec<ScaledFont>> {
    if paths.is_empty() {
        let path = find_system_font(&[])
            .context("no font configured and no system sans-serif font found")?;
        log::info!("using system font {}", path.display());
        return Ok(vec![cache.scaled(&path, size)?]);
    }
    paths
        .iter()
        .map(|path| {
            cache
                .scaled(path, size)
                .with_context(|| format!("failed to load font {}", path.display()))
        })
        .collect()
}

/// One `index x0 y0 x1 y1` line per glyph that left pixels.
fn box_lines(boxes: &[Option<BoundingBox>]) -> String {
    let mut out = String::new();
    for (glyph, bbox) in boxes.iter().enumerate() {
        if let Some(b) = bbox {
            out.push_str(&format!(
                "{} {} {} {} {}\n",
                glyph + 1,
                b.x0,
                b.y0,
                b.x1,
                b.y1
            ));
        }
    }
    out
}

/// `labels.txt` entry; newlines inside the label are escaped.
fn label_line(index: usize, label: &str) -> String {
    format!("{index}.png {}\n", label.replace('\n', "\\n"))
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_lines_skip_glyphs_without_pixels() {
        let boxes = [
            Some(BoundingBox {
                x0: 1,
                y0: 2,
                x1: 5,
                y1: 9,
            }),
            None,
            Some(BoundingBox {
                x0: 7,
                y0: 2,
                x1: 10,
                y1: 9,
            }),
        ];
        assert_eq!(box_lines(&boxes), "1 1 2 5 9\n3 7 2 10 9\n");
        assert_eq!(box_lines(&[]), "");
    }

    #[test]
    fn label_lines_escape_newlines() {
        assert_eq!(label_line(3, "ab\ncd"), "3.png ab\\ncd\n");
        assert_eq!(label_line(0, ""), "0.png \n");
    }
}
