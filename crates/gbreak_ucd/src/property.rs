use gbreak_base::EnumFromNameT;
use gbreak_macros::{EnumCount, EnumDisplay, EnumFromName};

/// Property tag as it was written in the source file
///
/// Tags are not validated when aggregating, so this can hold any text.
pub type PropertyName = String;

/// Grapheme cluster break property.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumFromName, EnumDisplay, EnumCount)]
pub enum PropertyTag {
    /// Carriage return
    CR,
    /// Line feed
    LF,
    Control,
    Extend,
    /// Paired flag symbols
    #[parse_name("Regional_Indicator")]
    #[display("Regional_Indicator")]
    RegionalIndicator,
    Prepend,
    SpacingMark,
    /// Hangul L syllable.
    L,
    /// Hangul V syllable.
    V,
    /// Hangul T syllable.
    T,
    /// Hangul LV syllable.
    LV,
    /// Hangul LVT syllable.
    LVT,
    /// Zero width joiner
    ZWJ,
    Emoji,
    #[parse_name("Emoji_Presentation")]
    #[display("Emoji_Presentation")]
    EmojiPresentation,
    /// Skin tone modifiers
    #[parse_name("Emoji_Modifier")]
    #[display("Emoji_Modifier")]
    EmojiModifier,
    #[parse_name("Emoji_Modifier_Base")]
    #[display("Emoji_Modifier_Base")]
    EmojiModifierBase,
    #[parse_name("Emoji_Component")]
    #[display("Emoji_Component")]
    EmojiComponent,
    #[parse_name("Extended_Pictographic")]
    #[display("Extended_Pictographic")]
    ExtendedPictographic,
}

impl PropertyTag {
    pub const ALL: [PropertyTag; 19] = [
        PropertyTag::CR,
        PropertyTag::LF,
        PropertyTag::Control,
        PropertyTag::Extend,
        PropertyTag::RegionalIndicator,
        PropertyTag::Prepend,
        PropertyTag::SpacingMark,
        PropertyTag::L,
        PropertyTag::V,
        PropertyTag::T,
        PropertyTag::LV,
        PropertyTag::LVT,
        PropertyTag::ZWJ,
        PropertyTag::Emoji,
        PropertyTag::EmojiPresentation,
        PropertyTag::EmojiModifier,
        PropertyTag::EmojiModifierBase,
        PropertyTag::EmojiComponent,
        PropertyTag::ExtendedPictographic,
    ];

    /// Get the tag from its UCD spelling
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as EnumFromNameT>::parse(name)
    }

    /// Check if the name is one of the known property tags
    pub fn is_known(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// Get the name of the variant in rust code, e.g. `RegionalIndicator`
    pub fn variant_name(self) -> String {
        format!("{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use gbreak_base::EnumCountT;
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(PropertyTag::from_name("CR"), Some(PropertyTag::CR));
        assert_eq!(PropertyTag::from_name("Regional_Indicator"), Some(PropertyTag::RegionalIndicator));
        assert_eq!(PropertyTag::from_name("Extended_Pictographic"), Some(PropertyTag::ExtendedPictographic));
        assert_eq!(PropertyTag::from_name("RegionalIndicator"), None);
        assert_eq!(PropertyTag::from_name("cr"), None);
        assert!(!PropertyTag::is_known("Other"));
    }

    #[test]
    fn test_display_round_trips() {
        assert_eq!(PropertyTag::COUNT, PropertyTag::ALL.len());
        for tag in PropertyTag::ALL {
            assert_eq!(PropertyTag::from_name(&tag.to_string()), Some(tag));
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(PropertyTag::EmojiModifierBase.to_string(), "Emoji_Modifier_Base");
        assert_eq!(PropertyTag::EmojiModifierBase.variant_name(), "EmojiModifierBase");
        assert_eq!(PropertyTag::LVT.to_string(), "LVT");
    }
}
