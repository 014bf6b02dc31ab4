use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("operating system \"{0}\" is not supported")]
    UnsupportedPlatform(String),
    #[error("architecture \"{0}\" is not supported")]
    UnsupportedArchitecture(String),
}

/// Operating-system family of the running process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    MacOs,
    Windows,
}

impl OsFamily {
    /// Classifies a reported OS name, case-insensitively.
    ///
    /// Accepts both the JVM-style `"Mac OS X"` spelling and the Rust
    /// process-reported `"macos"`.
    fn classify(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        if name == "linux" {
            Some(OsFamily::Linux)
        } else if name == "mac os x" || name == "macos" {
            Some(OsFamily::MacOs)
        } else if name.starts_with("windows") {
            Some(OsFamily::Windows)
        } else {
            None
        }
    }

    /// Lower-cased directory token used in archive layouts.
    pub fn dir_token(self) -> &'static str {
        match self {
            OsFamily::Linux => "linux",
            OsFamily::MacOs => "macos",
            OsFamily::Windows => "windows",
        }
    }

    /// Shared-library file extension for this OS.
    pub fn library_extension(self) -> &'static str {
        match self {
            OsFamily::Linux => "so",
            OsFamily::MacOs => "dylib",
            OsFamily::Windows => "dll",
        }
    }
}

/// CPU architecture of the running process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CpuArch {
    X86_32,
    X86_64,
    ArmV7,
    ArmV8,
}

impl CpuArch {
    /// Classifies a reported architecture string by exact alias membership.
    fn classify(name: &str) -> Option<Self> {
        match name {
            "i386" | "i686" | "x86" => Some(CpuArch::X86_32),
            "amd64" | "x86_64" => Some(CpuArch::X86_64),
            "arm" => Some(CpuArch::ArmV7),
            "aarch64" | "arm64" => Some(CpuArch::ArmV8),
            _ => None,
        }
    }

    /// Directory token used in archive layouts.
    ///
    /// Only the x86 family tokens are lower-cased; the ARM tokens keep
    /// their mixed casing. Externally-produced archives use exactly these
    /// directory names.
    pub fn dir_token(self) -> &'static str {
        match self {
            CpuArch::X86_32 => "x86_32",
            CpuArch::X86_64 => "x86_64",
            CpuArch::ArmV7 => "ARMv7",
            CpuArch::ArmV8 => "ARMv8",
        }
    }
}

/// Immutable OS/architecture pair, derived once per process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlatformDescriptor {
    pub os: OsFamily,
    pub arch: CpuArch,
}

impl PlatformDescriptor {
    /// Resolves the descriptor for the running process.
    pub fn current() -> Result<Self, PlatformError> {
        Self::from_parts(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Pure classifier over reported OS-name and architecture strings.
    pub fn from_parts(os_name: &str, arch_name: &str) -> Result<Self, PlatformError> {
        let os = OsFamily::classify(os_name)
            .ok_or_else(|| PlatformError::UnsupportedPlatform(os_name.to_string()))?;
        let arch = CpuArch::classify(arch_name)
            .ok_or_else(|| PlatformError::UnsupportedArchitecture(arch_name.to_string()))?;
        Ok(Self { os, arch })
    }

    /// Relative directory prefix for this platform's libraries inside an
    /// archive: `<namespace>/<os>/<arch>/`.
    pub fn library_prefix(&self, namespace: &str) -> String {
        format!(
            "{}/{}/{}/",
            namespace,
            self.os.dir_token(),
            self.arch.dir_token()
        )
    }

    pub fn library_extension(&self) -> &'static str {
        self.os.library_extension()
    }
}
