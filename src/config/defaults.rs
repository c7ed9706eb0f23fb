//! Default values and the built-in validator set.

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

default_fn!(default_true, bool, true);

/// File name looked up in the tools directory when no config is given
pub const CONFIG_FILE_NAME: &str = "validators.yaml";

/// Validators run when no configuration file is found: the current and the
/// legacy SPDX Java tools, both shipped as wrapper scripts next to the binary.
pub(crate) const BUILTIN_TOOLS: &[(&str, &str, &[&str])] = &[
    ("new java-tools", "spdx-tools-java.sh", &["Verify"]),
    ("old java-tools", "spdx-tools.sh", &["Verify"]),
];
