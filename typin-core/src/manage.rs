//! Font activation, deactivation and listing (made by FontLab https://www.fontlab.com/)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};

use crate::exec::{CommandRunner, CommandSpec, SystemRunner};
use crate::platform::Platform;

/// Dispatches font operations to the handler for one platform.
///
/// The platform and fonts directory are resolved once at construction; each
/// operation is otherwise stateless.
pub struct FontManager {
    platform: Platform,
    fonts_dir: PathBuf,
    runner: Box<dyn CommandRunner>,
}

impl FontManager {
    /// Manager for `platform` with the default deadline-guarded runner.
    pub fn new(platform: Platform) -> Self {
        Self::with_runner(platform, Box::new(SystemRunner::default()))
    }

    pub fn with_runner(platform: Platform, runner: Box<dyn CommandRunner>) -> Self {
        Self::rooted_at(platform, platform.user_fonts_dir(), runner)
    }

    /// Manager rooted at an explicit fonts directory instead of the
    /// platform-resolved one.
    pub fn rooted_at(platform: Platform, fonts_dir: PathBuf, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            platform,
            fonts_dir,
            runner,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn fonts_dir(&self) -> &Path {
        &self.fonts_dir
    }

    /// Install `source` for the current user.
    ///
    /// Copies the file into the fonts directory unless it is already there,
    /// then registers it with the OS. Re-activating an installed font skips
    /// the copy but repeats registration, so the call is idempotent.
    pub fn activate(&self, source: &Path) -> Result<()> {
        self.ensure_supported()?;
        let dest = self.destination(source)?;

        fs::create_dir_all(&self.fonts_dir).with_context(|| {
            format!("creating fonts directory {}", self.fonts_dir.display())
        })?;

        if !dest.exists() {
            fs::copy(source, &dest).with_context(|| {
                format!("copying {} to {}", source.display(), dest.display())
            })?;
        }

        if let Some(spec) = self.registration_command(&dest) {
            self.runner.run(&spec)?;
        }

        self.refresh_cache()
    }

    /// Remove `source` from the current user's installed fonts.
    ///
    /// Deactivating a font that was never installed deletes nothing but still
    /// refreshes the cache and succeeds.
    pub fn deactivate(&self, source: &Path) -> Result<()> {
        self.ensure_supported()?;
        let dest = self.destination(source)?;

        if dest.exists() {
            match self.removal_command(&dest) {
                Some(spec) => self.runner.run(&spec)?,
                None => fs::remove_file(&dest)
                    .with_context(|| format!("removing {}", dest.display()))?,
            }
        }

        self.refresh_cache()
    }

    /// Font files currently present in the fonts directory, in directory
    /// order. A missing directory yields an empty list.
    pub fn list(&self) -> Result<Vec<PathBuf>> {
        if !self.fonts_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut fonts = Vec::new();
        for entry in fs::read_dir(&self.fonts_dir)
            .with_context(|| format!("reading {}", self.fonts_dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && is_font_file(&path) {
                fonts.push(path);
            }
        }

        Ok(fonts)
    }

    fn ensure_supported(&self) -> Result<()> {
        if self.platform == Platform::Other {
            return Err(anyhow!(
                "unsupported operating system: {}",
                std::env::consts::OS
            ));
        }
        Ok(())
    }

    fn destination(&self, source: &Path) -> Result<PathBuf> {
        let name = source
            .file_name()
            .ok_or_else(|| anyhow!("font path has no file name: {}", source.display()))?;
        Ok(self.fonts_dir.join(name))
    }

    /// Post-copy registration step. Only Windows needs one: the shell's
    /// special Fonts folder installs the file on CopyHere.
    fn registration_command(&self, dest: &Path) -> Option<CommandSpec> {
        match self.platform {
            Platform::Windows => Some(CommandSpec::new(
                "powershell",
                [
                    "-NoProfile".to_string(),
                    "-Command".to_string(),
                    format!(
                        "$shell = New-Object -ComObject Shell.Application; \
                         $shell.Namespace(0x14).CopyHere(\"{}\")",
                        dest.display()
                    ),
                ],
            )),
            _ => None,
        }
    }

    /// File removal step for platforms where a plain delete is not enough.
    /// Windows also drops the per-user registry value; that part is
    /// best-effort so a missing value never blocks the delete.
    fn removal_command(&self, dest: &Path) -> Option<CommandSpec> {
        match self.platform {
            Platform::Windows => {
                let file_name = dest.file_name().map(|n| n.to_string_lossy().into_owned())?;
                Some(CommandSpec::new(
                    "powershell",
                    [
                        "-NoProfile".to_string(),
                        "-Command".to_string(),
                        format!(
                            "Remove-ItemProperty -Path 'HKCU:\\SOFTWARE\\Microsoft\\Windows NT\\CurrentVersion\\Fonts' \
                             -Name \"{file_name}\" -ErrorAction SilentlyContinue; \
                             Remove-Item -LiteralPath \"{}\" -Force",
                            dest.display()
                        ),
                    ],
                ))
            }
            _ => None,
        }
    }

    fn cache_refresh_command(&self) -> Option<CommandSpec> {
        match self.platform {
            Platform::MacOs => Some(CommandSpec::new("atsutil", ["databases", "-remove"])),
            Platform::Linux => Some(CommandSpec::new("fc-cache", ["-f"])),
            // The Windows shell invocation already maintains its cache.
            Platform::Windows | Platform::Other => None,
        }
    }

    fn refresh_cache(&self) -> Result<()> {
        if let Some(spec) = self.cache_refresh_command() {
            self.runner.run(&spec)?;
        }
        Ok(())
    }
}

/// True when the extension case-insensitively matches an installable font
/// format.
pub fn is_font_file(path: &Path) -> bool {
    let ext = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return false,
    };

    matches!(ext.as_str(), "ttf" | "otf" | "woff" | "woff2")
}
