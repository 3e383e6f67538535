//! Catalog fixtures

/// `dc1` has its own roles pin; every other location gets `default`
pub const CATALOG_DC1_AND_DEFAULT: &str = r#"
modules:
  dc1:
    roles:
      url: https://git.example.com/roles.git
      ref: dc1-stable
    apt_mirror:
      url: https://git.example.com/apt-mirror.git
      ref: v1.2
  default:
    roles:
      url: https://git.example.com/roles.git
      ref: production
"#;

/// Only `dc2` is configured, so any other location is a configuration error
pub const CATALOG_DC2_ONLY: &str = r#"
modules:
  dc2:
    roles:
      url: https://git.example.com/roles.git
      ref: dc2-stable
"#;

/// One good module and one whose clone hangs
pub const CATALOG_WITH_HANGING_CLONE: &str = r#"
modules:
  default:
    apt:
      url: https://git.example.com/apt.git
      ref: v2
    ntp:
      url: https://git.example.com/hang/ntp.git
      ref: v1
"#;

/// One good module and one whose clone is rejected by the remote
pub const CATALOG_WITH_MISSING_REPO: &str = r#"
modules:
  default:
    apt:
      url: https://git.example.com/apt.git
      ref: v2
    ghost:
      url: https://git.example.com/missing/ghost.git
      ref: master
"#;

/// Fake git: `clone --depth 1 <url> -b <ref> <target>`
///
/// URLs containing `/hang/` sleep past the clone timeout, URLs containing
/// `/missing/` fail like an unknown repository. Anything else produces a
/// directory recording the url and ref.
pub const FAKE_GIT: &str = r#"#!/bin/sh
case "$4" in
  */hang/*)
    sleep 10
    ;;
  */missing/*)
    echo "fatal: repository '$4' not found" >&2
    exit 128
    ;;
esac
mkdir -p "$7"
echo "$4" > "$7/URL"
echo "$6" > "$7/REF"
"#;
