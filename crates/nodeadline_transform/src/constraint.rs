//! Build constraints: `//go:build` lines and `_GOOS`/`_GOARCH` file name
//! suffixes.
//!
//! A file is part of the build only if both its name and its constraint
//! line match the target [`BuildContext`].

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// The target a package is built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Target operating system, as in `GOOS`.
    pub goos: String,
    /// Target architecture, as in `GOARCH`.
    pub goarch: String,
    /// Whether cgo is enabled.
    pub cgo: bool,
    /// Minor release of the toolchain (`22` for `go1.22.0`). `None` accepts
    /// every `go1.N` tag.
    pub go_minor: Option<u32>,
}

impl BuildContext {
    /// Creates a context for `goos`/`goarch` with cgo disabled.
    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        Self {
            goos: goos.into(),
            goarch: goarch.into(),
            cgo: false,
            go_minor: None,
        }
    }

    /// The platform this program runs on, in Go's naming.
    pub fn host() -> Self {
        let goos = match std::env::consts::OS {
            "macos" => "darwin",
            os => os,
        };
        let goarch = match std::env::consts::ARCH {
            "x86_64" => "amd64",
            "x86" => "386",
            "aarch64" => "arm64",
            "powerpc64" => "ppc64",
            "loongarch64" => "loong64",
            arch => arch,
        };
        Self::new(goos, goarch)
    }

    /// Sets whether cgo is enabled.
    pub fn with_cgo(mut self, cgo: bool) -> Self {
        self.cgo = cgo;
        self
    }

    /// Derives the release tags from a version such as `go1.22.0` or
    /// `go1.23rc1`. Unrecognized versions leave them unrestricted.
    pub fn with_go_version(mut self, version: &str) -> Self {
        self.go_minor = version.strip_prefix("go1.").and_then(|rest| {
            let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().ok()
        });
        self
    }

    /// Reports whether a single build tag is satisfied.
    pub fn matches_tag(&self, tag: &str) -> bool {
        if tag == self.goos || tag == self.goarch {
            return true;
        }
        match tag {
            "linux" => self.goos == "android",
            "solaris" => self.goos == "illumos",
            "darwin" => self.goos == "ios",
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            "gc" => true,
            "cgo" => self.cgo,
            _ => match tag.strip_prefix("go1.").map(str::parse::<u32>) {
                Some(Ok(minor)) => self.go_minor.map_or(true, |have| minor <= have),
                _ => false,
            },
        }
    }

    /// Applies the `_GOOS`, `_GOARCH` and `_GOOS_GOARCH` file name rules.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let stem = file_name.split('.').next().unwrap_or_default();
        let Some(i) = stem.find('_') else {
            return true;
        };
        let mut parts: Vec<&str> = stem[i..].split('_').collect();
        if parts.last() == Some(&"test") {
            parts.pop();
        }
        let n = parts.len();
        if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.matches_tag(parts[n - 2]) && self.matches_tag(parts[n - 1]);
        }
        match parts.last() {
            Some(last) if KNOWN_OS.contains(last) || KNOWN_ARCH.contains(last) => {
                self.matches_tag(last)
            }
            _ => true,
        }
    }

    /// Evaluates the `//go:build` line in the header of `source`, the part
    /// before the package clause. A file without one always matches.
    pub fn matches_header(&self, source: &str) -> Result<bool, String> {
        match find_build_line(source) {
            Some(expr) => ConstraintParser::new(expr, self).parse(),
            None => Ok(true),
        }
    }
}

/// Returns the expression of the first `//go:build` line before the first
/// line that is neither blank nor a line comment.
fn find_build_line(source: &str) -> Option<&str> {
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let comment = line.strip_prefix("//")?;
        if let Some(expr) = comment.strip_prefix("go:build") {
            if expr.is_empty() || expr.starts_with(char::is_whitespace) {
                return Some(expr.trim());
            }
        }
    }
    None
}

/// Evaluates `||`, `&&`, `!`, parentheses and tags in one pass.
struct ConstraintParser<'a> {
    rest: &'a str,
    context: &'a BuildContext,
}

impl<'a> ConstraintParser<'a> {
    fn new(expr: &'a str, context: &'a BuildContext) -> Self {
        Self {
            rest: expr,
            context,
        }
    }

    fn parse(mut self) -> Result<bool, String> {
        let value = self.parse_or()?;
        self.skip_space();
        if !self.rest.is_empty() {
            return Err(format!("unexpected {:?} in //go:build line", self.rest));
        }
        Ok(value)
    }

    fn skip_space(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, op: &str) -> bool {
        self.skip_space();
        match self.rest.strip_prefix(op) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn parse_or(&mut self) -> Result<bool, String> {
        let mut value = self.parse_and()?;
        while self.eat("||") {
            let rhs = self.parse_and()?;
            value = value || rhs;
        }
        Ok(value)
    }

    fn parse_and(&mut self) -> Result<bool, String> {
        let mut value = self.parse_not()?;
        while self.eat("&&") {
            let rhs = self.parse_not()?;
            value = value && rhs;
        }
        Ok(value)
    }

    fn parse_not(&mut self) -> Result<bool, String> {
        if self.eat("!") {
            return self.parse_not().map(|v| !v);
        }
        if self.eat("(") {
            let value = self.parse_or()?;
            if !self.eat(")") {
                return Err("missing ) in //go:build line".to_string());
            }
            return Ok(value);
        }
        self.skip_space();
        let len = self
            .rest
            .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(self.rest.len());
        if len == 0 {
            return Err("expected build tag in //go:build line".to_string());
        }
        let (tag, rest) = self.rest.split_at(len);
        self.rest = rest;
        Ok(self.context.matches_tag(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linux() -> BuildContext {
        BuildContext::new("linux", "amd64").with_go_version("go1.22.0")
    }

    #[test]
    fn tags() {
        let ctx = linux();
        assert!(ctx.matches_tag("linux"));
        assert!(ctx.matches_tag("amd64"));
        assert!(ctx.matches_tag("unix"));
        assert!(ctx.matches_tag("gc"));
        assert!(ctx.matches_tag("go1.21"));
        assert!(ctx.matches_tag("go1.22"));
        assert!(!ctx.matches_tag("go1.23"));
        assert!(!ctx.matches_tag("windows"));
        assert!(!ctx.matches_tag("cgo"));
        assert!(!ctx.matches_tag("ignore"));
        assert!(BuildContext::new("android", "arm64").matches_tag("linux"));
        assert!(BuildContext::new("linux", "amd64").matches_tag("go1.99"));
    }

    #[test]
    fn version_parsing() {
        assert_eq!(linux().go_minor, Some(22));
        assert_eq!(BuildContext::host().with_go_version("go1.23rc1").go_minor, Some(23));
        assert_eq!(BuildContext::host().with_go_version("devel +abc").go_minor, None);
    }

    #[test]
    fn file_name_suffixes() {
        let ctx = linux();
        assert!(ctx.matches_file_name("context.go"));
        assert!(ctx.matches_file_name("linux.go"));
        assert!(ctx.matches_file_name("zsys_linux.go"));
        assert!(ctx.matches_file_name("asm_linux_amd64.go"));
        assert!(ctx.matches_file_name("with_cause.go"));
        assert!(!ctx.matches_file_name("zsys_windows.go"));
        assert!(!ctx.matches_file_name("asm_arm64.go"));
        assert!(!ctx.matches_file_name("asm_linux_arm64.go"));
        assert!(!ctx.matches_file_name("os_darwin_test.go"));
    }

    #[test]
    fn build_lines() {
        let ctx = linux();
        assert_eq!(ctx.matches_header("package context\n"), Ok(true));
        assert_eq!(ctx.matches_header("//go:build ignore\n\npackage main\n"), Ok(false));
        assert_eq!(ctx.matches_header("// Copyright.\n\n//go:build linux && !cgo\n\npackage p\n"), Ok(true));
        assert_eq!(ctx.matches_header("//go:build (darwin || windows) && amd64\npackage p\n"), Ok(false));
        assert_eq!(ctx.matches_header("//go:build !go1.23\npackage p\n"), Ok(true));
    }

    #[test]
    fn build_line_after_package_clause_is_ignored() {
        let src = "package p\n\n//go:build ignore\n";
        assert_eq!(linux().matches_header(src), Ok(true));
    }

    #[test]
    fn malformed_build_lines() {
        let ctx = linux();
        assert!(ctx.matches_header("//go:build linux &&\npackage p\n").is_err());
        assert!(ctx.matches_header("//go:build (linux\npackage p\n").is_err());
        assert!(ctx.matches_header("//go:build linux amd64\npackage p\n").is_err());
    }
}
