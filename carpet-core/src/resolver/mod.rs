//! Placeholder artwork resolver.
//!
//! Maps an image reference (and optionally its alt text) to procedurally
//! generated SVG through an ordered rule table. The first matching rule wins;
//! anything unmatched gets the neutral default card, so resolution never fails.

mod generators;
mod svg;

pub use generators::{
    AchievementStyle, CompareTier, EffectStyle, ExampleStyle, GraphicKind, IconStyle, PatternStyle,
    PersonaStyle, PremiumArt, ThreadStyle, default_placeholder,
};
pub use svg::{SvgDocument, SvgElement};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::ColorSpec;

pub const DEFAULT_PRIMARY: &str = "#1CB0F6";
pub const DEFAULT_SECONDARY: &str = "#0F8BC0";
pub const DEFAULT_RULE: &str = "default";

/// A single predicate over one input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Contains(&'static str),
    Equals(&'static str),
    /// Every fragment must appear.
    ContainsAll(&'static [&'static str]),
}

impl Matcher {
    #[must_use]
    pub fn matches(self, input: &str) -> bool {
        match self {
            Self::Contains(fragment) => input.contains(fragment),
            Self::Equals(exact) => input == exact,
            Self::ContainsAll(fragments) => fragments.iter().all(|fragment| input.contains(fragment)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleFamily {
    Pattern,
    Thumbnail,
    Thread,
    Effect,
    Icon,
    Character,
    PremiumFeature,
    Achievement,
    PremiumDefault,
    Generic,
}

impl RuleFamily {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Thumbnail => "thumbnail",
            Self::Thread => "thread",
            Self::Effect => "effect",
            Self::Icon => "icon",
            Self::Character => "character",
            Self::PremiumFeature => "premium-feature",
            Self::Achievement => "achievement",
            Self::PremiumDefault => "premium-feature-default",
            Self::Generic => "generic",
        }
    }
}

/// Where a rule's colors come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coloring {
    /// Caller's palette, falling back to the defaults.
    Palette,
    Fixed(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub family: RuleFamily,
    pub path: &'static [Matcher],
    pub alt: &'static [Matcher],
    pub kind: GraphicKind,
    pub coloring: Coloring,
}

impl Rule {
    /// Any path predicate on the normalized key, or any alt predicate on
    /// the alt text.
    #[must_use]
    pub fn matches(&self, key: &str, alt_text: Option<&str>) -> bool {
        self.path.iter().any(|matcher| matcher.matches(key))
            || alt_text.is_some_and(|alt| self.alt.iter().any(|matcher| matcher.matches(alt)))
    }

    fn colors<'a>(&self, palette: &'a Palette) -> (&'a str, &'a str) {
        match self.coloring {
            Coloring::Palette => (palette.primary(), palette.secondary()),
            Coloring::Fixed(primary) => (primary, DEFAULT_SECONDARY),
        }
    }
}

macro_rules! rule {
    ($name:literal, $family:ident, $kind:expr, $coloring:expr, path: [$($path:expr),* $(,)?], alt: [$($alt:expr),* $(,)?]) => {
        Rule {
            name: $name,
            family: RuleFamily::$family,
            path: &[$($path),*],
            alt: &[$($alt),*],
            kind: $kind,
            coloring: $coloring,
        }
    };
}

use Coloring::{Fixed, Palette as Caller};
use Matcher::{Contains, ContainsAll, Equals};

static RULES: &[Rule] = &[
    rule!("pattern-classic", Pattern, GraphicKind::Pattern(PatternStyle::Classic), Caller,
        path: [Contains("patterns/classic"), Equals("classic.svg")], alt: []),
    rule!("pattern-geometric", Pattern, GraphicKind::Pattern(PatternStyle::Geometric), Caller,
        path: [Contains("patterns/geometric"), Equals("geometric.svg")], alt: []),
    rule!("pattern-floral", Pattern, GraphicKind::Pattern(PatternStyle::Floral), Caller,
        path: [Contains("patterns/floral"), Equals("floral.svg")], alt: []),
    rule!("pattern-arabesque", Pattern, GraphicKind::Pattern(PatternStyle::Arabesque), Caller,
        path: [Contains("patterns/arabesque"), Equals("arabesque.svg")], alt: []),
    rule!("pattern-royal", Pattern, GraphicKind::Pattern(PatternStyle::Royal), Caller,
        path: [Contains("patterns/royal"), Equals("royal.svg")], alt: []),
    rule!("thumb-classic", Thumbnail, GraphicKind::Pattern(PatternStyle::Classic), Caller,
        path: [Contains("classic-thumb")], alt: []),
    rule!("thumb-geometric", Thumbnail, GraphicKind::Pattern(PatternStyle::Geometric), Caller,
        path: [Contains("geometric-thumb")], alt: []),
    rule!("thumb-floral", Thumbnail, GraphicKind::Pattern(PatternStyle::Floral), Caller,
        path: [Contains("floral-thumb")], alt: []),
    rule!("thumb-arabesque", Thumbnail, GraphicKind::Pattern(PatternStyle::Arabesque), Caller,
        path: [Contains("arabesque-thumb")], alt: []),
    rule!("thumb-royal", Thumbnail, GraphicKind::Pattern(PatternStyle::Royal), Caller,
        path: [Contains("royal-thumb")], alt: []),
    rule!("thread-standard", Thread, GraphicKind::Thread(ThreadStyle::Standard), Caller,
        path: [Contains("threads/standard"), Equals("standard.svg")], alt: []),
    rule!("thread-silver", Thread, GraphicKind::Thread(ThreadStyle::Silver), Caller,
        path: [Contains("threads/silver"), Equals("silver.svg")], alt: []),
    rule!("thread-gold", Thread, GraphicKind::Thread(ThreadStyle::Gold), Caller,
        path: [Contains("threads/gold"), Equals("gold.svg")], alt: []),
    rule!("thread-magical", Thread, GraphicKind::Thread(ThreadStyle::Magical), Caller,
        path: [Contains("threads/magical"), Equals("magical.svg")], alt: []),
    rule!("effect-sound-waves", Effect, GraphicKind::Effect(EffectStyle::SoundWaves), Caller,
        path: [Contains("effects/sound-waves"), Equals("sound-waves.svg")], alt: []),
    rule!("effect-particles", Effect, GraphicKind::Effect(EffectStyle::Particles), Caller,
        path: [Contains("effects/interactive-particles"), Equals("interactive-particles.svg")], alt: []),
    rule!("effect-personalized", Effect, GraphicKind::Effect(EffectStyle::Personalized), Caller,
        path: [Contains("effects/personalized-blend"), Equals("personalized-blend.svg")], alt: []),
    rule!("effect-diamond-sparkle", Effect, GraphicKind::Effect(EffectStyle::DiamondSparkle), Caller,
        path: [Contains("effects/diamond-sparkle"), Equals("diamond-sparkle.svg")], alt: []),
    rule!("effect-gold-glow", Effect, GraphicKind::Effect(EffectStyle::GoldGlow), Caller,
        path: [Contains("effects/gold-glow"), Equals("gold-glow.svg")], alt: []),
    rule!("icon-visual", Icon, GraphicKind::Icon(IconStyle::Visual), Fixed("#1CB0F6"),
        path: [Contains("visual-learner")], alt: [Contains("Visual learning")]),
    rule!("icon-auditory", Icon, GraphicKind::Icon(IconStyle::Auditory), Fixed("#E91E63"),
        path: [Contains("auditory-learner")], alt: [Contains("Auditory")]),
    rule!("icon-kinesthetic", Icon, GraphicKind::Icon(IconStyle::Kinesthetic), Fixed("#FF9800"),
        path: [Contains("kinesthetic-learner")], alt: [Contains("Kinesthetic")]),
    rule!("icon-personalized", Icon, GraphicKind::Icon(IconStyle::Personalized), Fixed("#4CAF50"),
        path: [Contains("personalized-learner")], alt: [Contains("Personalized")]),
    rule!("icon-streak", Icon, GraphicKind::Icon(IconStyle::Streak), Fixed("#FFD900"),
        path: [Contains("streak-icon")], alt: [Contains("Streak")]),
    rule!("icon-gems", Icon, GraphicKind::Icon(IconStyle::Gems), Fixed("#A560F8"),
        path: [Contains("gems-icon")], alt: [Contains("Gems")]),
    rule!("icon-league", Icon, GraphicKind::Icon(IconStyle::League), Fixed("#00BCD4"),
        path: [Contains("league-icon")], alt: [Contains("League")]),
    rule!("companion", Character, GraphicKind::Companion, Caller,
        path: [Contains("duo-flying")], alt: [Contains("Duo")]),
    rule!("persona-samuel", Character, GraphicKind::Persona(PersonaStyle::Boy), Fixed("#4CAF50"),
        path: [Contains("persona-samuel")], alt: [ContainsAll(&["Samuel", "Visual"])]),
    rule!("persona-amelia", Character, GraphicKind::Persona(PersonaStyle::Girl), Fixed("#E91E63"),
        path: [Contains("persona-amelia")], alt: [ContainsAll(&["Amelia", "Auditory"])]),
    rule!("persona-daniel", Character, GraphicKind::Persona(PersonaStyle::Boy2), Fixed("#FF9800"),
        path: [Contains("persona-daniel")], alt: [ContainsAll(&["Daniel", "Kinesthetic"])]),
    rule!("carpet-visual-learner", Character, GraphicKind::CarpetExample(ExampleStyle::Visual), Fixed("#4CAF50"),
        path: [Contains("carpet-visual-learner")], alt: [Contains("Visual learner carpet")]),
    rule!("carpet-auditory-learner", Character, GraphicKind::CarpetExample(ExampleStyle::Auditory), Fixed("#E91E63"),
        path: [Contains("carpet-auditory-learner")], alt: [Contains("Auditory learner carpet")]),
    rule!("carpet-kinesthetic-learner", Character, GraphicKind::CarpetExample(ExampleStyle::Kinesthetic), Fixed("#FF9800"),
        path: [Contains("carpet-kinesthetic-learner")], alt: [Contains("Kinesthetic learner carpet")]),
    rule!("carpet-free", PremiumFeature, GraphicKind::CarpetCompare(CompareTier::Free), Caller,
        path: [Contains("carpet-free")], alt: [Contains("Free Magic Carpet")]),
    rule!("carpet-premium", PremiumFeature, GraphicKind::CarpetCompare(CompareTier::Premium), Caller,
        path: [Contains("carpet-premium")],
        alt: [Contains("Premium Magic Carpet"), Contains("Magic Carpet Flying")]),
    rule!("premium-patterns", PremiumFeature, GraphicKind::PremiumFeature(PremiumArt::Patterns), Caller,
        path: [Contains("premium/premium-patterns"), Contains("premium-patterns.svg")], alt: []),
    rule!("premium-colors", PremiumFeature, GraphicKind::PremiumFeature(PremiumArt::Colors), Caller,
        path: [Contains("premium/premium-colors"), Contains("premium-colors.svg")], alt: []),
    rule!("premium-threads", PremiumFeature, GraphicKind::PremiumFeature(PremiumArt::Threads), Caller,
        path: [Contains("premium/premium-threads"), Contains("premium-threads.svg")], alt: []),
    rule!("premium-learning", PremiumFeature, GraphicKind::PremiumFeature(PremiumArt::Learning), Caller,
        path: [Contains("premium/premium-learning"), Contains("premium-learning.svg")], alt: []),
    rule!("premium-league", PremiumFeature, GraphicKind::PremiumFeature(PremiumArt::League), Caller,
        path: [Contains("premium/premium-league"), Contains("premium-league.svg")], alt: []),
    rule!("achievement-streak", Achievement, GraphicKind::Achievement(AchievementStyle::Streak), Caller,
        path: [Contains("achievements/streak-threads"), Contains("streak-threads.svg")], alt: []),
    rule!("achievement-gems", Achievement, GraphicKind::Achievement(AchievementStyle::Gems), Caller,
        path: [Contains("achievements/gem-embellishments"), Contains("gem-embellishments.svg")], alt: []),
    rule!("achievement-league", Achievement, GraphicKind::Achievement(AchievementStyle::League), Caller,
        path: [Contains("achievements/league-heights"), Contains("league-heights.svg")], alt: []),
    rule!("premium-feature-default", PremiumDefault, GraphicKind::PremiumFeature(PremiumArt::Patterns), Caller,
        path: [Contains("premium-feature-default")], alt: []),
    rule!("generic-visual", Generic, GraphicKind::CarpetExample(ExampleStyle::Visual), Fixed("#4CAF50"),
        path: [Contains("visual")], alt: []),
    rule!("generic-auditory", Generic, GraphicKind::CarpetExample(ExampleStyle::Auditory), Fixed("#E91E63"),
        path: [Contains("auditory")], alt: []),
    rule!("generic-kinesthetic", Generic, GraphicKind::CarpetExample(ExampleStyle::Kinesthetic), Fixed("#FF9800"),
        path: [Contains("kinesthetic")], alt: []),
    rule!("generic-pattern", Generic, GraphicKind::Pattern(PatternStyle::Classic), Fixed(DEFAULT_PRIMARY),
        path: [Contains("pattern")], alt: []),
    rule!("generic-streak", Generic, GraphicKind::Achievement(AchievementStyle::Streak), Caller,
        path: [Contains("streak")], alt: []),
    rule!("generic-gem", Generic, GraphicKind::Achievement(AchievementStyle::Gems), Caller,
        path: [Contains("gem")], alt: []),
    rule!("generic-league", Generic, GraphicKind::Achievement(AchievementStyle::League), Caller,
        path: [Contains("league")], alt: []),
    rule!("generic-premium", Generic, GraphicKind::CarpetCompare(CompareTier::Premium), Caller,
        path: [Contains("premium")], alt: []),
    rule!("generic-free", Generic, GraphicKind::CarpetCompare(CompareTier::Free), Caller,
        path: [Contains("free")], alt: []),
    rule!("generic-carpet", Generic, GraphicKind::CarpetCompare(CompareTier::Premium), Caller,
        path: [Contains("carpet")], alt: []),
];

/// The dispatch table in evaluation order.
#[must_use]
pub fn rules() -> &'static [Rule] {
    RULES
}

/// Colors handed to palette-driven generators.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl Palette {
    #[must_use]
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            primary: Some(primary.into()),
            secondary: Some(secondary.into()),
        }
    }

    #[must_use]
    pub fn primary(&self) -> &str {
        self.primary.as_deref().unwrap_or(DEFAULT_PRIMARY)
    }

    #[must_use]
    pub fn secondary(&self) -> &str {
        self.secondary.as_deref().unwrap_or(DEFAULT_SECONDARY)
    }
}

impl From<&ColorSpec> for Palette {
    fn from(spec: &ColorSpec) -> Self {
        Self::new(spec.primary.clone(), spec.secondary.clone())
    }
}

/// Both input channels for one image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderRequest<'a> {
    pub path: &'a str,
    pub alt_text: Option<&'a str>,
    pub palette: Palette,
}

impl<'a> PlaceholderRequest<'a> {
    #[must_use]
    pub fn new(path: &'a str) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_alt(mut self, alt_text: &'a str) -> Self {
        self.alt_text = Some(alt_text);
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedGraphic {
    /// Name of the matched rule, or [`DEFAULT_RULE`].
    pub rule: &'static str,
    pub kind: GraphicKind,
    pub document: SvgDocument,
}

impl GeneratedGraphic {
    #[must_use]
    pub fn markup(&self) -> String {
        self.document.to_markup()
    }

    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        self.document.fingerprint()
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.rule == DEFAULT_RULE
    }
}

/// Reduce a path to its last two segments: `images/threads/gold.svg`
/// becomes `threads/gold.svg`. An empty directory segment is dropped, so
/// `/gold.svg` and `images//gold.svg` both become `gold.svg`.
#[must_use]
pub fn normalize_key(path: &str) -> &str {
    let Some(last) = path.rfind('/') else {
        return path;
    };
    let file = &path[last + 1..];
    let dir_start = path[..last].rfind('/').map_or(0, |previous| previous + 1);
    if dir_start == last {
        file
    } else {
        &path[dir_start..]
    }
}

#[must_use]
pub fn match_rule(key: &str, alt_text: Option<&str>) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.matches(key, alt_text))
}

/// Path-only resolution with default colors.
#[must_use]
pub fn resolve(path: &str) -> GeneratedGraphic {
    resolve_request(&PlaceholderRequest::new(path))
}

#[must_use]
pub fn resolve_with_palette(path: &str, palette: &Palette) -> GeneratedGraphic {
    resolve_request(&PlaceholderRequest::new(path).with_palette(palette.clone()))
}

#[must_use]
pub fn resolve_request(request: &PlaceholderRequest<'_>) -> GeneratedGraphic {
    let key = normalize_key(request.path);
    match match_rule(key, request.alt_text) {
        Some(rule) => {
            let (primary, secondary) = rule.colors(&request.palette);
            GeneratedGraphic {
                rule: rule.name,
                kind: rule.kind,
                document: rule.kind.render(primary, secondary),
            }
        }
        None => {
            debug!(
                "no placeholder rule for {:?} (alt {:?}); using default",
                request.path, request.alt_text
            );
            GeneratedGraphic {
                rule: DEFAULT_RULE,
                kind: GraphicKind::Default,
                document: default_placeholder(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn normalization_keeps_last_two_segments() {
        assert_eq!(normalize_key("images/threads/gold.svg"), "threads/gold.svg");
        assert_eq!(normalize_key("threads/gold.svg"), "threads/gold.svg");
        assert_eq!(normalize_key("gold.svg"), "gold.svg");
        assert_eq!(normalize_key("/a/b/c/d.svg"), "c/d.svg");
        assert_eq!(normalize_key(""), "");
    }

    #[test]
    fn normalization_drops_empty_directory_segments() {
        assert_eq!(normalize_key("/gold.svg"), "gold.svg");
        assert_eq!(normalize_key("a//gold.svg"), "gold.svg");
        assert_eq!(normalize_key("images//threads/gold.svg"), "threads/gold.svg");
        assert_eq!(resolve("/gold.svg").rule, "thread-gold");
        assert_eq!(resolve("images//gold.svg").rule, "thread-gold");
    }

    #[test]
    fn rule_names_are_unique() {
        let names: HashSet<&str> = rules().iter().map(|rule| rule.name).collect();
        assert_eq!(names.len(), rules().len());
        assert!(!names.contains(DEFAULT_RULE));
    }

    #[test]
    fn families_appear_in_chain_order() {
        let order = [
            RuleFamily::Pattern,
            RuleFamily::Thumbnail,
            RuleFamily::Thread,
            RuleFamily::Effect,
            RuleFamily::Icon,
            RuleFamily::Character,
            RuleFamily::PremiumFeature,
            RuleFamily::Achievement,
            RuleFamily::PremiumDefault,
            RuleFamily::Generic,
        ];
        let mut seen = Vec::new();
        for rule in rules() {
            if seen.last() != Some(&rule.family) {
                seen.push(rule.family);
            }
        }
        assert_eq!(seen, order);
    }

    #[test]
    fn specific_pattern_beats_generic_keyword() {
        assert_eq!(resolve("patterns/classic.svg").rule, "pattern-classic");
        assert_eq!(resolve("misc/pattern-sheet.png").rule, "generic-pattern");
    }

    #[test]
    fn thumbnails_under_patterns_dir_hit_pattern_rule() {
        assert_eq!(resolve("images/patterns/classic-thumb.svg").rule, "pattern-classic");
        assert_eq!(resolve("thumbs/royal-thumb.svg").rule, "thumb-royal");
        assert_eq!(
            resolve("images/patterns/classic-thumb.svg").markup(),
            resolve("thumbs/classic-thumb.svg").markup()
        );
    }

    #[test]
    fn alt_channel_is_independent_of_path() {
        let by_alt = resolve_request(
            &PlaceholderRequest::new("img/unknown.png").with_alt("Samuel, Visual learner"),
        );
        assert_eq!(by_alt.rule, "persona-samuel");
        assert!(resolve("img/Samuel-Visual.png").is_default());

        let auditory = resolve_request(&PlaceholderRequest::new("x.png").with_alt("Auditory badge"));
        assert_eq!(auditory.rule, "icon-auditory");
    }

    #[test]
    fn palette_only_reaches_palette_rules() {
        let palette = Palette::new("#FF0000", "#00FF00");
        let pattern = resolve_with_palette("patterns/floral.svg", &palette);
        assert!(pattern.markup().contains("#FF0000"));
        assert!(pattern.markup().contains("#00FF00"));

        let icon = resolve_with_palette("icons/visual-learner.svg", &palette);
        assert!(!icon.markup().contains("#FF0000"));
        assert_eq!(icon.markup(), resolve("icons/visual-learner.svg").markup());

        let generic = resolve_with_palette("misc/pattern.png", &palette);
        assert!(generic.markup().contains(DEFAULT_PRIMARY));
    }

    #[test]
    fn unknown_keys_fall_back() {
        let graphic = resolve("images/nothing-here.png");
        assert!(graphic.is_default());
        assert_eq!(graphic.kind, GraphicKind::Default);
        assert!(graphic.markup().contains("Image Placeholder"));
    }

    #[test]
    fn palette_defaults_and_color_spec() {
        let palette = Palette::default();
        assert_eq!(palette.primary(), DEFAULT_PRIMARY);
        assert_eq!(palette.secondary(), DEFAULT_SECONDARY);
        let spec = ColorSpec {
            primary: String::from("#58CC02"),
            secondary: String::from("#46A302"),
        };
        assert_eq!(Palette::from(&spec).secondary(), "#46A302");
    }
}
