use anyhow::{Result, ensure};
use std::io::Write;

use carpet_core::{GeneratedGraphic, Palette, PlaceholderRequest, resolve_request};

/// One placeholder render requested from the command line.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub key: String,
    pub alt: Option<String>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl RenderRequest {
    pub fn resolve(&self) -> Result<GeneratedGraphic> {
        for color in self.primary.iter().chain(&self.secondary) {
            ensure!(is_hex_color(color), "'{color}' is not a #RRGGBB color");
        }
        let palette = Palette {
            primary: self.primary.clone(),
            secondary: self.secondary.clone(),
        };
        let mut request = PlaceholderRequest::new(&self.key).with_palette(palette);
        if let Some(alt) = self.alt.as_deref() {
            request = request.with_alt(alt);
        }
        Ok(resolve_request(&request))
    }
}

/// Write the SVG markup followed by a trailing newline.
pub fn write_graphic(out: &mut dyn Write, graphic: &GeneratedGraphic) -> Result<()> {
    writeln!(out, "{}", graphic.document)?;
    Ok(())
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
