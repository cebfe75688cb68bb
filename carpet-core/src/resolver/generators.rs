//! Procedural artwork for each placeholder family.
//!
//! Every generator is pure: the same style and colors always yield the same
//! document.

use serde::{Deserialize, Serialize};

use super::svg::{SvgDocument, SvgElement};

const GRID_COLUMNS: [f32; 5] = [10.0, 30.0, 50.0, 70.0, 90.0];
const SPARKLE_POINTS: [(f32, f32); 8] = [
    (10.0, 10.0),
    (50.0, 15.0),
    (90.0, 10.0),
    (35.0, 50.0),
    (75.0, 55.0),
    (10.0, 70.0),
    (50.0, 75.0),
    (90.0, 70.0),
];
const WAVE_PATH: &str = "M10,50 Q25,30 40,50 Q55,70 70,50 Q85,30 100,50";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternStyle {
    Classic,
    Geometric,
    Floral,
    Arabesque,
    Royal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThreadStyle {
    Standard,
    Silver,
    Gold,
    Magical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectStyle {
    SoundWaves,
    Particles,
    Personalized,
    DiamondSparkle,
    GoldGlow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconStyle {
    Visual,
    Auditory,
    Kinesthetic,
    Personalized,
    Streak,
    Gems,
    League,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PersonaStyle {
    Boy,
    Girl,
    Boy2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExampleStyle {
    Visual,
    Auditory,
    Kinesthetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompareTier {
    Free,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PremiumArt {
    Patterns,
    Colors,
    Threads,
    Learning,
    League,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AchievementStyle {
    Streak,
    Gems,
    League,
}

/// What a matched rule draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "family", content = "style", rename_all = "kebab-case")]
pub enum GraphicKind {
    Pattern(PatternStyle),
    Thread(ThreadStyle),
    Effect(EffectStyle),
    Icon(IconStyle),
    Companion,
    Persona(PersonaStyle),
    CarpetExample(ExampleStyle),
    CarpetCompare(CompareTier),
    PremiumFeature(PremiumArt),
    Achievement(AchievementStyle),
    Default,
}

impl GraphicKind {
    #[must_use]
    pub const fn family(self) -> &'static str {
        match self {
            Self::Pattern(_) => "pattern",
            Self::Thread(_) => "thread",
            Self::Effect(_) => "effect",
            Self::Icon(_) => "icon",
            Self::Companion => "companion",
            Self::Persona(_) => "persona",
            Self::CarpetExample(_) => "carpet-example",
            Self::CarpetCompare(_) => "carpet-compare",
            Self::PremiumFeature(_) => "premium-feature",
            Self::Achievement(_) => "achievement",
            Self::Default => "default",
        }
    }

    /// Render with the given colors. Families with fixed artwork ignore them.
    #[must_use]
    pub fn render(self, primary: &str, secondary: &str) -> SvgDocument {
        match self {
            Self::Pattern(style) => pattern(style, primary, secondary),
            Self::Thread(style) => thread(style, primary),
            Self::Effect(style) => effect(style, primary),
            Self::Icon(style) => icon(style, primary),
            Self::Companion => companion(),
            Self::Persona(style) => persona(style, primary),
            Self::CarpetExample(style) => carpet_example(style, primary),
            Self::CarpetCompare(tier) => carpet_compare(tier),
            Self::PremiumFeature(art) => premium_feature(art),
            Self::Achievement(style) => achievement(style),
            Self::Default => default_placeholder(),
        }
    }
}

fn group() -> SvgElement {
    SvgElement::new("g")
}

fn backdrop(fill: &str, opacity: f32) -> SvgElement {
    SvgElement::new("rect")
        .attr("width", "100%")
        .attr("height", "100%")
        .attr("fill", fill)
        .attr("opacity", opacity)
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> SvgElement {
    SvgElement::new("rect")
        .attr("x", x)
        .attr("y", y)
        .attr("width", width)
        .attr("height", height)
}

fn circle(cx: f32, cy: f32, r: f32) -> SvgElement {
    SvgElement::new("circle")
        .attr("cx", cx)
        .attr("cy", cy)
        .attr("r", r)
}

fn ellipse(cx: f32, cy: f32, rx: f32, ry: f32) -> SvgElement {
    SvgElement::new("ellipse")
        .attr("cx", cx)
        .attr("cy", cy)
        .attr("rx", rx)
        .attr("ry", ry)
}

fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> SvgElement {
    SvgElement::new("line")
        .attr("x1", x1)
        .attr("y1", y1)
        .attr("x2", x2)
        .attr("y2", y2)
}

fn path(d: impl Into<String>) -> SvgElement {
    SvgElement::new("path").attr("d", d.into())
}

fn polygon(points: impl Into<String>) -> SvgElement {
    SvgElement::new("polygon").attr("points", points.into())
}

fn label(x: f32, y: f32, size: u32, fill: &str, content: &str) -> SvgElement {
    SvgElement::new("text")
        .attr("x", x)
        .attr("y", y)
        .attr("font-family", "Arial")
        .attr("font-size", size)
        .attr("fill", fill)
        .text(content)
}

fn linear_gradient(id: &str, x2: &str, y2: &str, stops: &[(&str, &str, Option<f32>)]) -> SvgElement {
    SvgElement::new("defs").child(
        SvgElement::new("linearGradient")
            .attr("id", id)
            .attr("x1", "0%")
            .attr("y1", "0%")
            .attr("x2", x2)
            .attr("y2", y2)
            .children(stops.iter().map(|(offset, color, opacity)| {
                let stop = SvgElement::new("stop")
                    .attr("offset", offset)
                    .attr("stop-color", color);
                match opacity {
                    Some(opacity) => stop.attr("stop-opacity", opacity),
                    None => stop,
                }
            })),
    )
}

/// Bead positions shared by the premium threads: even columns skip the
/// outer rows.
fn bead_positions() -> impl Iterator<Item = (f32, f32)> {
    GRID_COLUMNS
        .iter()
        .enumerate()
        .flat_map(|(index, &x)| {
            let rows: &[f32] = if index % 2 == 0 {
                &[20.0, 40.0, 60.0, 80.0]
            } else {
                &[10.0, 30.0, 50.0, 70.0, 90.0]
            };
            rows.iter().map(move |&y| (x, y))
        })
}

/// Rows of cells offset by one cell on odd rows.
fn staggered(rows: u8, columns: u8, step: f32, row_height: f32) -> impl Iterator<Item = (f32, f32)> {
    (0..rows).flat_map(move |row| {
        let offset = if row % 2 == 1 { step / 2.0 } else { 0.0 };
        (0..columns).map(move |column| {
            (
                offset + f32::from(column) * step,
                f32::from(row) * row_height,
            )
        })
    })
}

fn pattern(style: PatternStyle, primary: &str, secondary: &str) -> SvgDocument {
    let background = backdrop(primary, 0.1);
    let detail = match style {
        PatternStyle::Classic => vec![
            group()
                .attr("fill", secondary)
                .attr("opacity", 0.2)
                .children(staggered(4, 5, 20.0, 10.0).map(|(x, y)| rect(x, y, 10.0, 10.0))),
        ],
        PatternStyle::Geometric => vec![
            group()
                .attr("fill", secondary)
                .attr("opacity", 0.2)
                .children(staggered(3, 5, 20.0, 10.0).map(|(x, y)| {
                    polygon(format!(
                        "{x},{y} {},{y} {},{}",
                        x + 10.0,
                        x + 5.0,
                        y + 10.0
                    ))
                })),
        ],
        PatternStyle::Floral => {
            let blooms = [10.0_f32, 20.0, 30.0].into_iter().flat_map(|y| {
                let xs: &[f32] = if y == 20.0 {
                    &[20.0, 40.0, 60.0, 80.0]
                } else {
                    &GRID_COLUMNS
                };
                xs.iter().map(move |&x| circle(x, y, 5.0))
            });
            let vines = [10.0_f32, 20.0, 30.0].into_iter().flat_map(|y| {
                let starts: &[f32] = if y == 20.0 {
                    &[20.0, 40.0, 60.0]
                } else {
                    &[10.0, 30.0, 50.0, 70.0]
                };
                starts.iter().map(move |&x| {
                    path(format!(
                        "M{x},{y} C{},{} {},{} {},{y}",
                        x + 5.0,
                        y - 5.0,
                        x + 15.0,
                        y - 5.0,
                        x + 20.0
                    ))
                })
            });
            vec![
                group()
                    .attr("fill", secondary)
                    .attr("opacity", 0.2)
                    .children(blooms),
                group()
                    .attr("fill", "none")
                    .attr("stroke", secondary)
                    .attr("stroke-width", 1)
                    .attr("opacity", 0.3)
                    .children(vines),
            ]
        }
        PatternStyle::Arabesque => {
            let scrolls = [0.0_f32, 20.0, 40.0, 60.0, 80.0].into_iter().map(|x| {
                let mut d = format!("M{x},0");
                for step in 0..5_u8 {
                    let top = f32::from(step) * 20.0;
                    d.push_str(&format!(" Q{},{} {x},{}", x + 10.0, top + 10.0, top + 20.0));
                }
                path(d)
            });
            let rings = [10.0_f32, 30.0, 50.0]
                .into_iter()
                .flat_map(|y| GRID_COLUMNS.iter().map(move |&x| circle(x, y, 5.0)));
            vec![
                group()
                    .attr("fill", secondary)
                    .attr("opacity", 0.3)
                    .children(scrolls),
                group()
                    .attr("fill", "none")
                    .attr("stroke", secondary)
                    .attr("stroke-width", 0.5)
                    .attr("opacity", 0.2)
                    .children(rings),
            ]
        }
        PatternStyle::Royal => {
            let tiles = [(10.0_f32, 10.0_f32), (20.0, 20.0), (10.0, 30.0)]
                .into_iter()
                .flat_map(|(start, y)| {
                    (0..4_u8).map(move |column| {
                        let x = start + f32::from(column) * 20.0;
                        path(format!(
                            "M{x},{y} L{},{y} L{},{} L{x},{} Z",
                            x + 10.0,
                            x + 10.0,
                            y + 10.0,
                            y + 10.0
                        ))
                    })
                });
            let frame = [
                "M0,0 L100,0 L100,100 L0,100 Z",
                "M10,10 L90,10 L90,90 L10,90 Z",
                "M0,0 L100,100",
                "M0,100 L100,0",
                "M50,0 L50,100",
                "M0,50 L100,50",
            ]
            .into_iter()
            .map(path);
            vec![
                group()
                    .attr("fill", secondary)
                    .attr("opacity", 0.3)
                    .children(tiles),
                group()
                    .attr("fill", "none")
                    .attr("stroke", secondary)
                    .attr("stroke-width", 0.5)
                    .attr("opacity", 0.2)
                    .children(frame),
            ]
        }
    };
    SvgDocument::new(std::iter::once(background).chain(detail))
}

fn warp(stroke: &str, opacity: f32, width: f32) -> SvgElement {
    group()
        .attr("stroke", stroke)
        .attr("opacity", opacity)
        .attr("stroke-linecap", "round")
        .children(
            GRID_COLUMNS
                .iter()
                .map(|&x| line(x, 0.0, x, 100.0).attr("stroke-width", width)),
        )
}

fn beads(fill: &str, opacity: f32, radius: f32) -> SvgElement {
    group()
        .attr("fill", fill)
        .attr("opacity", opacity)
        .children(bead_positions().map(|(x, y)| circle(x, y, radius)))
}

fn thread(style: ThreadStyle, primary: &str) -> SvgDocument {
    match style {
        ThreadStyle::Standard => SvgDocument::new([warp(primary, 0.3, 1.0)]),
        ThreadStyle::Silver => SvgDocument::new([
            warp("#BDBDBD", 0.5, 2.0),
            beads("#E0E0E0", 0.7, 2.0),
        ]),
        ThreadStyle::Gold => SvgDocument::new([
            warp("#FFD900", 0.7, 2.0),
            beads("#FFC107", 0.8, 3.0),
            group()
                .attr("fill", "#FFEB3B")
                .attr("opacity", 0.5)
                .children(
                    GRID_COLUMNS
                        .iter()
                        .zip([20.0, 30.0, 40.0, 50.0, 60.0])
                        .map(|(&x, y)| circle(x, y, 4.0)),
                ),
        ]),
        ThreadStyle::Magical => SvgDocument::new([
            linear_gradient(
                "rainbowGradient",
                "100%",
                "0%",
                &[
                    ("0%", "#FF0000", None),
                    ("16.67%", "#FF9900", None),
                    ("33.33%", "#FFFF00", None),
                    ("50%", "#00FF00", None),
                    ("66.67%", "#0099FF", None),
                    ("83.33%", "#0000FF", None),
                    ("100%", "#9900FF", None),
                ],
            ),
            warp("url(#rainbowGradient)", 0.7, 3.0),
            beads("#FFFFFF", 0.9, 2.0),
        ]),
    }
}

fn sparkles(fill: &str, opacity: f32, radii: [f32; 8]) -> SvgElement {
    group()
        .attr("fill", fill)
        .attr("opacity", opacity)
        .children(
            SPARKLE_POINTS
                .iter()
                .zip(radii)
                .map(|(&(x, y), r)| circle(x, y, r)),
        )
}

fn effect(style: EffectStyle, primary: &str) -> SvgDocument {
    const OUTER: [f32; 8] = [3.0, 4.0, 3.0, 3.0, 4.0, 4.0, 3.0, 3.0];
    const INNER: [f32; 8] = [1.0, 1.5, 1.0, 1.0, 1.5, 1.5, 1.0, 1.0];
    match style {
        EffectStyle::SoundWaves => SvgDocument::new([group()
            .attr("stroke", primary)
            .attr("fill", "none")
            .attr("opacity", 0.3)
            .children(
                [
                    WAVE_PATH,
                    "M0,50 Q15,20 30,50 Q45,80 60,50 Q75,20 90,50",
                    "M20,50 Q35,40 50,50 Q65,60 80,50",
                ]
                .into_iter()
                .map(|d| path(d).attr("stroke-width", 1)),
            )]),
        EffectStyle::Particles => {
            const MOTES: [(f32, f32, f32); 15] = [
                (10.0, 10.0, 2.0),
                (30.0, 20.0, 1.5),
                (50.0, 15.0, 2.5),
                (70.0, 25.0, 1.0),
                (90.0, 10.0, 2.0),
                (15.0, 40.0, 1.0),
                (35.0, 50.0, 2.0),
                (55.0, 45.0, 1.5),
                (75.0, 55.0, 2.5),
                (95.0, 40.0, 1.0),
                (10.0, 70.0, 2.5),
                (30.0, 80.0, 1.0),
                (50.0, 75.0, 2.0),
                (70.0, 85.0, 1.5),
                (90.0, 70.0, 2.0),
            ];
            SvgDocument::new([group()
                .attr("fill", primary)
                .attr("opacity", 0.3)
                .children(MOTES.iter().map(|&(x, y, r)| circle(x, y, r)))])
        }
        EffectStyle::Personalized => SvgDocument::new([
            linear_gradient(
                "personalizationGradient",
                "100%",
                "100%",
                &[
                    ("0%", "#4CAF50", Some(0.3)),
                    ("50%", "#2196F3", Some(0.3)),
                    ("100%", "#9C27B0", Some(0.3)),
                ],
            ),
            backdrop("url(#personalizationGradient)", 0.5),
            group()
                .attr("stroke", "#FFFFFF")
                .attr("fill", "none")
                .attr("opacity", 0.2)
                .child(path(WAVE_PATH).attr("stroke-width", 1)),
            sparkles("#FFFFFF", 0.3, [2.0, 2.5, 2.0, 2.0, 2.5, 2.5, 2.0, 2.0]),
        ]),
        EffectStyle::DiamondSparkle => SvgDocument::new([
            sparkles("#00BCD4", 0.3, OUTER),
            sparkles("#FFFFFF", 0.5, INNER),
        ]),
        EffectStyle::GoldGlow => SvgDocument::new([
            sparkles("#FFC107", 0.3, OUTER),
            sparkles("#FFFFFF", 0.2, INNER),
        ]),
    }
}

fn icon(style: IconStyle, color: &str) -> SvgDocument {
    let halo = circle(50.0, 50.0, 40.0)
        .attr("fill", color)
        .attr("opacity", 0.2);
    let glyph = match style {
        IconStyle::Visual => group()
            .attr("fill", color)
            .child(circle(35.0, 40.0, 5.0))
            .child(circle(65.0, 40.0, 5.0))
            .child(
                path("M35,65 Q50,75 65,65")
                    .attr("stroke", color)
                    .attr("stroke-width", 3)
                    .attr("fill", "none"),
            ),
        IconStyle::Auditory => group()
            .attr("fill", "none")
            .attr("stroke", color)
            .attr("stroke-width", 3)
            .child(path("M30,50 Q40,30 50,50 Q60,70 70,50"))
            .child(path("M25,50 Q40,20 55,50 Q70,80 85,50"))
            .child(circle(50.0, 50.0, 15.0).attr("stroke-width", 2)),
        IconStyle::Kinesthetic => group()
            .attr("fill", color)
            .child(rect(35.0, 35.0, 30.0, 30.0).attr("rx", 5))
            .child(circle(50.0, 50.0, 10.0).attr("fill", "white")),
        IconStyle::Personalized => group()
            .child(path("M30,30 L70,30 L70,70 L30,70 Z").attr("fill", color))
            .child(path("M40,40 L60,40 L60,60 L40,60 Z").attr("fill", "white"))
            .child(path("M45,45 L55,45 L55,55 L45,55 Z").attr("fill", color)),
        IconStyle::Streak => group()
            .child(
                path("M30,50 L45,65 L70,35")
                    .attr("stroke", color)
                    .attr("stroke-width", 5)
                    .attr("fill", "none"),
            )
            .child(
                circle(50.0, 50.0, 30.0)
                    .attr("stroke", color)
                    .attr("stroke-width", 3)
                    .attr("fill", "none"),
            ),
        IconStyle::Gems => group()
            .attr("fill", color)
            .child(polygon("50,25 65,45 50,65 35,45"))
            .child(
                polygon("50,25 65,45 50,65 35,45")
                    .attr("fill", "white")
                    .attr("transform", "scale(0.7) translate(22, 22)"),
            ),
        IconStyle::League => group()
            .child(circle(50.0, 50.0, 25.0).attr("fill", color))
            .child(
                path("M50,25 L55,40 L70,40 L60,50 L65,65 L50,55 L35,65 L40,50 L30,40 L45,40 Z")
                    .attr("fill", "#FFFFFF"),
            ),
    };
    SvgDocument::new([halo, glyph])
}

fn companion() -> SvgDocument {
    const GREEN: &str = "#58CC02";
    let crest = |d: &str, width: u32| {
        path(d.to_string())
            .attr("fill", "none")
            .attr("stroke", GREEN)
            .attr("stroke-width", width)
    };
    SvgDocument::new([group()
        .child(ellipse(50.0, 60.0, 30.0, 35.0).attr("fill", GREEN))
        .child(circle(50.0, 40.0, 25.0).attr("fill", GREEN))
        .child(ellipse(35.0, 38.0, 10.0, 12.0).attr("fill", "white"))
        .child(ellipse(65.0, 38.0, 10.0, 12.0).attr("fill", "white"))
        .child(circle(35.0, 38.0, 6.0).attr("fill", "#333333"))
        .child(circle(65.0, 38.0, 6.0).attr("fill", "#333333"))
        .child(circle(37.0, 36.0, 2.0).attr("fill", "white"))
        .child(circle(67.0, 36.0, 2.0).attr("fill", "white"))
        .child(ellipse(50.0, 52.0, 10.0, 8.0).attr("fill", "#FFC65A"))
        .child(path("M50,45 L45,52 L55,52 Z").attr("fill", "#E3982B"))
        .child(crest("M25,25 Q35,10 50,15 Q65,10 75,25", 5))
        .child(crest("M30,15 L25,0", 3))
        .child(crest("M70,15 L75,0", 3))])
}

fn persona(style: PersonaStyle, color: &str) -> SvgDocument {
    const SKIN: &str = "#FFD9B3";
    const INK: &str = "#333333";
    let (hair, hair_color) = match style {
        PersonaStyle::Boy => ("M30,40 Q50,20 70,40", "#663300"),
        PersonaStyle::Girl => ("M25,45 Q50,15 75,45", "#FF9900"),
        PersonaStyle::Boy2 => ("M35,30 Q50,10 65,30", "#333333"),
    };
    SvgDocument::new([
        circle(50.0, 50.0, 45.0)
            .attr("fill", color)
            .attr("opacity", 0.2),
        circle(50.0, 40.0, 20.0).attr("fill", SKIN),
        path("M30,70 Q50,80 70,70")
            .attr("stroke", SKIN)
            .attr("stroke-width", 20)
            .attr("fill", "none")
            .attr("stroke-linecap", "round"),
        path(hair).attr("fill", hair_color),
        circle(40.0, 35.0, 3.0).attr("fill", INK),
        circle(60.0, 35.0, 3.0).attr("fill", INK),
        path("M45,45 Q50,50 55,45")
            .attr("stroke", INK)
            .attr("stroke-width", 2)
            .attr("fill", "none"),
    ])
}

fn carpet_body(fill: &str) -> SvgElement {
    rect(10.0, 20.0, 80.0, 60.0)
        .attr("rx", 5)
        .attr("fill", fill)
        .attr("opacity", 0.8)
}

fn carpet_example(style: ExampleStyle, color: &str) -> SvgDocument {
    let quarters = [20.0_f32, 40.0, 60.0, 80.0];
    let overlay = match style {
        ExampleStyle::Visual => {
            const MIDDLE: [f32; 3] = [30.0, 50.0, 70.0];
            let dots = [(30.0_f32, &quarters[..]), (50.0, &MIDDLE[..]), (70.0, &quarters[..])]
                .into_iter()
                .flat_map(|(y, xs)| xs.iter().map(move |&x| circle(x, y, 5.0)));
            vec![
                group()
                    .attr("fill", "white")
                    .attr("opacity", 0.3)
                    .children(dots),
                group()
                    .attr("stroke", "yellow")
                    .attr("stroke-width", 2)
                    .attr("opacity", 0.5)
                    .children(quarters.iter().map(|&x| line(x, 30.0, x, 70.0))),
            ]
        }
        ExampleStyle::Auditory => {
            let rows = [40.0_f32, 50.0, 60.0];
            vec![
                group()
                    .attr("stroke", "white")
                    .attr("fill", "none")
                    .attr("stroke-width", 2)
                    .attr("opacity", 0.3)
                    .children(rows.iter().map(|&y| {
                        path(format!(
                            "M20,{y} Q30,{} 40,{y} Q50,{} 60,{y} Q70,{} 80,{y}",
                            y - 10.0,
                            y + 10.0,
                            y - 10.0
                        ))
                    })),
                group()
                    .attr("fill", "yellow")
                    .attr("opacity", 0.5)
                    .children(
                        rows.iter()
                            .flat_map(|&y| quarters.iter().map(move |&x| circle(x, y, 3.0))),
                    ),
            ]
        }
        ExampleStyle::Kinesthetic => {
            let tiles = [30.0_f32, 55.0].into_iter().flat_map(|y| {
                [20.0_f32, 45.0, 70.0]
                    .into_iter()
                    .map(move |x| rect(x, y, 15.0, 15.0).attr("rx", 2))
            });
            let knots = [37.5_f32, 62.5].into_iter().flat_map(|y| {
                [27.5_f32, 52.5, 77.5]
                    .into_iter()
                    .map(move |x| circle(x, y, 3.0).attr("fill", "yellow"))
            });
            vec![
                group()
                    .attr("fill", "white")
                    .attr("opacity", 0.3)
                    .children(tiles),
                group()
                    .attr("stroke", "yellow")
                    .attr("stroke-width", 2)
                    .attr("opacity", 0.5)
                    .child(line(20.0, 40.0, 85.0, 40.0))
                    .child(line(20.0, 65.0, 85.0, 65.0))
                    .children(knots),
            ]
        }
    };
    SvgDocument::new(std::iter::once(carpet_body(color)).chain(overlay))
}

fn carpet_compare(tier: CompareTier) -> SvgDocument {
    let weave = group()
        .attr("fill", "white")
        .attr("opacity", 0.4)
        .children(
            [(30.0_f32, 20.0_f32), (45.0, 30.0), (60.0, 20.0)]
                .into_iter()
                .flat_map(|(y, start)| {
                    (0..3_u8).map(move |column| rect(start + f32::from(column) * 20.0, y, 10.0, 10.0))
                }),
        );
    let warp_x = [20.0_f32, 40.0, 60.0, 80.0];
    match tier {
        CompareTier::Free => SvgDocument::new([
            carpet_body("#1CB0F6"),
            weave,
            group()
                .attr("stroke", "#BDBDBD")
                .attr("stroke-width", 1)
                .attr("opacity", 0.5)
                .children(warp_x.iter().map(|&x| line(x, 35.0, x, 65.0))),
            label(35.0, 15.0, 10, "#757575", "Free Version"),
        ]),
        CompareTier::Premium => SvgDocument::new([
            carpet_body("#FFD900"),
            weave,
            group()
                .attr("stroke", "#FFC107")
                .attr("stroke-width", 2)
                .attr("opacity", 0.7)
                .children(warp_x.iter().map(|&x| line(x, 35.0, x, 65.0))),
            group()
                .attr("fill", "#FFC107")
                .attr("opacity", 0.7)
                .children(
                    [35.0_f32, 65.0]
                        .into_iter()
                        .flat_map(|y| warp_x.iter().map(move |&x| circle(x, y, 3.0))),
                ),
            label(30.0, 15.0, 10, "#7E6500", "Premium Version"),
        ]),
    }
}

fn stroked_lines(stroke: &str, width: u32, opacity: f32, lines: &[(f32, f32, f32, f32)]) -> SvgElement {
    group()
        .attr("stroke", stroke)
        .attr("stroke-width", width)
        .attr("opacity", opacity)
        .children(lines.iter().map(|&(x1, y1, x2, y2)| line(x1, y1, x2, y2)))
}

fn dots(fill: &str, opacity: f32, points: &[(f32, f32, f32)]) -> SvgElement {
    group()
        .attr("fill", fill)
        .attr("opacity", opacity)
        .children(points.iter().map(|&(x, y, r)| circle(x, y, r)))
}

fn premium_feature(art: PremiumArt) -> SvgDocument {
    match art {
        PremiumArt::Patterns => SvgDocument::new([
            rect(10.0, 10.0, 35.0, 35.0).attr("rx", 5).attr("fill", "#BDBDBD").attr("opacity", 0.5),
            rect(55.0, 10.0, 35.0, 35.0).attr("rx", 5).attr("fill", "#FFD900").attr("opacity", 0.5),
            rect(10.0, 55.0, 35.0, 35.0).attr("rx", 5).attr("fill", "#BDBDBD").attr("opacity", 0.5),
            rect(55.0, 55.0, 35.0, 35.0).attr("rx", 5).attr("fill", "#FFD900").attr("opacity", 0.5),
            stroked_lines(
                "#757575",
                1,
                0.6,
                &[
                    (20.0, 15.0, 20.0, 40.0),
                    (35.0, 15.0, 35.0, 40.0),
                    (20.0, 60.0, 20.0, 85.0),
                    (35.0, 60.0, 35.0, 85.0),
                ],
            ),
            stroked_lines(
                "#FFC107",
                2,
                0.8,
                &[
                    (65.0, 15.0, 65.0, 40.0),
                    (80.0, 15.0, 80.0, 40.0),
                    (65.0, 60.0, 65.0, 85.0),
                    (80.0, 60.0, 80.0, 85.0),
                ],
            ),
            dots(
                "#FFC107",
                0.8,
                &[
                    (65.0, 20.0, 3.0),
                    (65.0, 35.0, 3.0),
                    (80.0, 20.0, 3.0),
                    (80.0, 35.0, 3.0),
                    (65.0, 65.0, 3.0),
                    (65.0, 80.0, 3.0),
                    (80.0, 65.0, 3.0),
                    (80.0, 80.0, 3.0),
                ],
            ),
            label(18.0, 27.0, 6, "#333333", "Basic"),
            label(63.0, 27.0, 6, "#7E6500", "Premium"),
        ]),
        PremiumArt::Colors => SvgDocument::new([
            circle(30.0, 30.0, 20.0).attr("fill", "#1CB0F6"),
            circle(70.0, 30.0, 20.0).attr("fill", "#FFD900"),
            circle(30.0, 70.0, 20.0).attr("fill", "#58CC02"),
            circle(70.0, 70.0, 20.0).attr("fill", "#FF9800"),
            label(23.0, 33.0, 8, "white", "Basic"),
            label(58.0, 33.0, 8, "#7E6500", "Gold"),
            label(23.0, 73.0, 8, "white", "Basic"),
            label(58.0, 73.0, 8, "white", "Premium"),
            circle(70.0, 30.0, 24.0)
                .attr("stroke", "#FFC107")
                .attr("stroke-width", 2)
                .attr("fill", "none"),
            circle(70.0, 70.0, 24.0)
                .attr("stroke", "#FF7043")
                .attr("stroke-width", 2)
                .attr("fill", "none"),
        ]),
        PremiumArt::Threads => {
            let rows = [35.0_f32, 50.0, 65.0];
            let column = |x: f32, r: f32| rows.map(|y| (x, y, r));
            let plain: Vec<(f32, f32, f32)> =
                [column(20.0, 2.0), column(40.0, 2.0)].concat();
            let gilded: Vec<(f32, f32, f32)> =
                [column(60.0, 3.0), column(80.0, 3.0)].concat();
            SvgDocument::new([
                rect(10.0, 40.0, 80.0, 20.0).attr("rx", 5).attr("fill", "#EEEEEE"),
                stroked_lines("#BDBDBD", 1, 0.8, &[(20.0, 25.0, 20.0, 75.0), (40.0, 25.0, 40.0, 75.0)]),
                stroked_lines("#FFD900", 2, 0.8, &[(60.0, 25.0, 60.0, 75.0), (80.0, 25.0, 80.0, 75.0)]),
                dots("#BDBDBD", 0.8, &plain),
                dots("#FFC107", 0.9, &gilded),
                label(17.0, 20.0, 6, "#757575", "Standard"),
                label(57.0, 20.0, 6, "#7E6500", "Premium"),
            ])
        }
        PremiumArt::Learning => SvgDocument::new([
            rect(10.0, 10.0, 35.0, 35.0).attr("rx", 5).attr("fill", "#EEEEEE"),
            rect(55.0, 10.0, 35.0, 35.0).attr("rx", 5).attr("fill", "#EEEEEE"),
            rect(10.0, 55.0, 35.0, 35.0).attr("rx", 5).attr("fill", "#EEEEEE"),
            rect(55.0, 55.0, 35.0, 35.0).attr("rx", 5).attr("fill", "#FFF8E1"),
            label(15.0, 25.0, 6, "#333333", "Visual"),
            label(60.0, 25.0, 6, "#333333", "Auditory"),
            label(15.0, 70.0, 6, "#333333", "Kinesthetic"),
            label(60.0, 70.0, 6, "#7E6500", "Adaptive"),
            group()
                .attr("fill", "#333333")
                .attr("opacity", 0.6)
                .child(circle(20.0, 35.0, 5.0))
                .children(
                    [30.0_f32, 35.0, 40.0]
                        .into_iter()
                        .map(|y| rect(65.0, y, 15.0, 2.0).attr("rx", 1)),
                )
                .child(
                    path("M20,75 Q25,80 30,75")
                        .attr("stroke", "#333333")
                        .attr("stroke-width", 2)
                        .attr("fill", "none"),
                ),
            group()
                .attr("stroke", "#FFD900")
                .attr("stroke-width", 2)
                .attr("opacity", 0.8)
                .child(circle(65.0, 75.0, 8.0).attr("fill", "none"))
                .child(circle(75.0, 75.0, 3.0).attr("fill", "#FFD900"))
                .child(circle(85.0, 75.0, 5.0).attr("fill", "none")),
        ]),
        PremiumArt::League => SvgDocument::new([
            rect(10.0, 60.0, 20.0, 30.0).attr("rx", 5).attr("fill", "#CD7F32").attr("opacity", 0.8),
            rect(40.0, 50.0, 20.0, 40.0).attr("rx", 5).attr("fill", "#9E9E9E").attr("opacity", 0.8),
            rect(70.0, 30.0, 20.0, 60.0).attr("rx", 5).attr("fill", "#00BCD4").attr("opacity", 0.8),
            label(11.0, 75.0, 5, "white", "Bronze"),
            label(42.0, 75.0, 5, "white", "Silver"),
            label(72.0, 75.0, 5, "white", "Diamond"),
            line(0.0, 90.0, 100.0, 90.0)
                .attr("stroke", "#757575")
                .attr("stroke-width", 1)
                .attr("stroke-dasharray", "2,2"),
            line(80.0, 25.0, 80.0, 90.0)
                .attr("stroke", "#00BCD4")
                .attr("stroke-width", 1)
                .attr("stroke-dasharray", "2,2"),
            dots("#FFC107", 0.6, &[(80.0, 25.0, 5.0), (80.0, 20.0, 3.0), (80.0, 15.0, 2.0)]),
        ]),
    }
}

fn achievement(style: AchievementStyle) -> SvgDocument {
    let track = || {
        rect(10.0, 30.0, 80.0, 40.0)
            .attr("rx", 5)
            .attr("fill", "#1CB0F6")
            .attr("opacity", 0.5)
    };
    match style {
        AchievementStyle::Streak => {
            let earned: Vec<(f32, f32, f32)> = [65.0_f32, 80.0]
                .into_iter()
                .flat_map(|x| [35.0_f32, 50.0, 65.0].map(|y| (x, y, 3.0)))
                .collect();
            SvgDocument::new([
                track(),
                stroked_lines(
                    "#BDBDBD",
                    1,
                    0.5,
                    &[(20.0, 25.0, 20.0, 75.0), (35.0, 25.0, 35.0, 75.0), (50.0, 25.0, 50.0, 75.0)],
                ),
                stroked_lines("#FFD900", 2, 0.7, &[(65.0, 25.0, 65.0, 75.0), (80.0, 25.0, 80.0, 75.0)]),
                label(15.0, 20.0, 6, "#757575", "Day 1"),
                label(30.0, 20.0, 6, "#757575", "Day 2"),
                label(45.0, 20.0, 6, "#757575", "Day 3"),
                label(60.0, 20.0, 6, "#7E6500", "Day 4"),
                label(75.0, 20.0, 6, "#7E6500", "Day 5"),
                dots("#FFC107", 0.7, &earned),
            ])
        }
        AchievementStyle::Gems => SvgDocument::new([
            track(),
            group()
                .attr("fill", "#A560F8")
                .attr("opacity", 0.7)
                .children(
                    ["20,40 25,45 20,50 15,45", "35,45 40,50 35,55 30,50", "50,40 55,45 50,50 45,45"]
                        .into_iter()
                        .map(polygon),
                ),
            group()
                .attr("fill", "#FFC107")
                .attr("opacity", 0.8)
                .children(
                    ["65,40 72,47 65,54 58,47", "85,45 90,50 85,55 80,50"]
                        .into_iter()
                        .map(polygon),
                ),
            dots(
                "#FFFFFF",
                0.9,
                &[
                    (20.0, 40.0, 1.0),
                    (35.0, 45.0, 1.0),
                    (50.0, 40.0, 1.0),
                    (65.0, 40.0, 1.5),
                    (85.0, 45.0, 1.0),
                ],
            ),
            label(20.0, 65.0, 5, "#333333", "0-50 gems"),
            label(60.0, 65.0, 5, "#7E6500", "50+ gems"),
        ]),
        AchievementStyle::League => SvgDocument::new([
            rect(10.0, 10.0, 15.0, 80.0).attr("rx", 2).attr("fill", "#F5F5F5"),
            rect(40.0, 40.0, 15.0, 50.0).attr("rx", 2).attr("fill", "#CD7F32").attr("opacity", 0.8),
            rect(60.0, 30.0, 15.0, 60.0).attr("rx", 2).attr("fill", "#9E9E9E").attr("opacity", 0.8),
            rect(80.0, 15.0, 15.0, 75.0).attr("rx", 2).attr("fill", "#00BCD4").attr("opacity", 0.8),
            line(0.0, 90.0, 100.0, 90.0)
                .attr("stroke", "#757575")
                .attr("stroke-width", 1),
            label(35.0, 35.0, 5, "#333333", "Bronze"),
            label(55.0, 25.0, 5, "#333333", "Silver"),
            label(75.0, 10.0, 5, "#333333", "Diamond"),
            dots("#FFC107", 0.7, &[(45.0, 45.0, 3.0), (65.0, 35.0, 3.0), (85.0, 20.0, 3.0)]),
        ]),
    }
}

/// Neutral card shown when nothing matches.
#[must_use]
pub fn default_placeholder() -> SvgDocument {
    SvgDocument::new([
        backdrop("#EEEEEE", 1.0),
        label(20.0, 55.0, 10, "#757575", "Image Placeholder"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(elements: &'a [SvgElement], name: &str, out: &mut Vec<&'a SvgElement>) {
        for element in elements {
            if element.name() == name {
                out.push(element);
            }
            find(element.child_elements(), name, out);
        }
    }

    fn all<'a>(doc: &'a SvgDocument, name: &str) -> Vec<&'a SvgElement> {
        let mut out = Vec::new();
        find(doc.elements(), name, &mut out);
        out
    }

    #[test]
    fn classic_is_checkerboard_of_twenty_cells() {
        let doc = pattern(PatternStyle::Classic, "#1CB0F6", "#0F8BC0");
        let cells: Vec<_> = all(&doc, "rect").into_iter().skip(1).collect();
        assert_eq!(cells.len(), 20);
        assert_eq!(cells[5].attr_value("x"), Some("10"));
        assert_eq!(cells[5].attr_value("y"), Some("10"));
        assert_eq!(doc.elements()[0].attr_value("fill"), Some("#1CB0F6"));
        assert_eq!(doc.elements()[1].attr_value("fill"), Some("#0F8BC0"));
    }

    #[test]
    fn geometric_triangles_alternate_rows() {
        let doc = pattern(PatternStyle::Geometric, "#1CB0F6", "#0F8BC0");
        let triangles = all(&doc, "polygon");
        assert_eq!(triangles.len(), 15);
        assert_eq!(triangles[0].attr_value("points"), Some("0,0 10,0 5,10"));
        assert_eq!(triangles[9].attr_value("points"), Some("90,10 100,10 95,20"));
    }

    #[test]
    fn floral_and_arabesque_counts() {
        let floral = pattern(PatternStyle::Floral, "#58CC02", "#46A302");
        assert_eq!(all(&floral, "circle").len(), 14);
        let vines = all(&floral, "path");
        assert_eq!(vines.len(), 11);
        assert_eq!(vines[0].attr_value("d"), Some("M10,10 C15,5 25,5 30,10"));

        let arabesque = pattern(PatternStyle::Arabesque, "#58CC02", "#46A302");
        let scrolls = all(&arabesque, "path");
        assert_eq!(scrolls.len(), 5);
        assert_eq!(
            scrolls[0].attr_value("d"),
            Some("M0,0 Q10,10 0,20 Q10,30 0,40 Q10,50 0,60 Q10,70 0,80 Q10,90 0,100")
        );
        assert_eq!(all(&arabesque, "circle").len(), 15);
    }

    #[test]
    fn royal_has_tiles_and_frame() {
        let doc = pattern(PatternStyle::Royal, "#FFD900", "#E6C300");
        let paths = all(&doc, "path");
        assert_eq!(paths.len(), 18);
        assert_eq!(paths[4].attr_value("d"), Some("M20,20 L30,20 L30,30 L20,30 Z"));
    }

    #[test]
    fn gold_thread_carries_beads_and_highlights() {
        let doc = thread(ThreadStyle::Gold, "#1CB0F6");
        assert_eq!(all(&doc, "line").len(), 5);
        assert_eq!(all(&doc, "circle").len(), 22 + 5);
        assert!(doc.to_markup().contains("#FFD900"));
        assert!(!doc.to_markup().contains("#1CB0F6"));
    }

    #[test]
    fn magical_thread_defines_rainbow() {
        let doc = thread(ThreadStyle::Magical, "#1CB0F6");
        assert_eq!(all(&doc, "stop").len(), 7);
        assert!(doc.to_markup().contains("url(#rainbowGradient)"));
    }

    #[test]
    fn standard_thread_uses_caller_color() {
        let doc = thread(ThreadStyle::Standard, "#123456");
        assert_eq!(doc.elements()[0].attr_value("stroke"), Some("#123456"));
        assert!(all(&doc, "circle").is_empty());
    }

    #[test]
    fn sparkle_effects_pair_outer_and_inner() {
        let doc = effect(EffectStyle::DiamondSparkle, "#000000");
        assert_eq!(all(&doc, "circle").len(), 16);
        let doc = effect(EffectStyle::Particles, "#FF0000");
        assert_eq!(all(&doc, "circle").len(), 15);
    }

    #[test]
    fn every_kind_renders_something() {
        let kinds = [
            GraphicKind::Icon(IconStyle::League),
            GraphicKind::Companion,
            GraphicKind::Persona(PersonaStyle::Girl),
            GraphicKind::CarpetExample(ExampleStyle::Kinesthetic),
            GraphicKind::CarpetCompare(CompareTier::Premium),
            GraphicKind::PremiumFeature(PremiumArt::Learning),
            GraphicKind::Achievement(AchievementStyle::Gems),
            GraphicKind::Default,
        ];
        for kind in kinds {
            assert!(kind.render("#1CB0F6", "#0F8BC0").element_count() > 1, "{kind:?}");
        }
    }

    #[test]
    fn default_card_reads_image_placeholder() {
        let texts = default_placeholder();
        let labels = all(&texts, "text");
        assert_eq!(labels[0].text_content(), Some("Image Placeholder"));
    }
}
