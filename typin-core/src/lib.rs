//! typin-core: the courteous stagehand of font installation
//!
//! Where its sibling typg finds fonts, typin puts them to work. This library
//! escorts a font file into the user's font directory, taps the operating
//! system on the shoulder so its caches get rebuilt, and shows the font out
//! again when asked.
//!
//! ## Three small favours
//!
//! **Activate**: copy the font into the per-user fonts directory (skipped
//! when it already lives there) and register it with the OS.
//!
//! **Deactivate**: remove the font from that directory, tidying the Windows
//! registry entry along the way, and refresh the font cache.
//!
//! **List**: report which font files currently live in the directory.
//!
//! Everything is synchronous and stateless. Each [`manage::FontManager`]
//! resolves the fonts directory once and shells out to the native cache
//! utilities (`fc-cache`, `atsutil`, the Windows shell) through one narrow,
//! deadline-guarded seam in [`exec`].
//!
//! ---
//!
//! Crafted with care at FontLab https://www.fontlab.com/

pub mod exec;
pub mod manage;
pub mod output;
pub mod platform;
