//! Item name to URL/file-name token. Page paths and sitemap URLs both go
//! through [`slugify`] so they always agree.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Anything that is not an ASCII word character, whitespace or a hyphen.
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\s-]").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static HYPHENS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Lowercase, trim, drop disallowed characters, then collapse whitespace
/// runs and hyphen runs to a single hyphen each.
///
/// Trimming happens before stripping, so `"Bones (burnt) "` keeps no
/// trailing hyphen but `"Ring !"` becomes `"ring-"`.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped = DISALLOWED_RE.replace_all(lowered.trim(), "");
    let hyphenated = WHITESPACE_RE.replace_all(&stripped, "-");
    HYPHENS_RE.replace_all(&hyphenated, "-").into_owned()
}

pub fn page_file_name(name: &str) -> String {
    format!("{}.html", slugify(name))
}

/// `<items_dir>/<slug>.html`
pub fn item_path(items_dir: &Path, name: &str) -> PathBuf {
    items_dir.join(page_file_name(name))
}

/// `<base_url>/items/<slug>.html`
pub fn item_url(base_url: &str, name: &str) -> String {
    format!("{base_url}/items/{}", page_file_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typical_item_names() {
        assert_eq!(slugify("Abyssal whip"), "abyssal-whip");
        assert_eq!(slugify("Ahrim's hood"), "ahrims-hood");
        assert_eq!(slugify("Amulet of glory(4)"), "amulet-of-glory4");
        assert_eq!(slugify("Dragon dagger(p++)"), "dragon-daggerp");
        assert_eq!(slugify("3rd age platebody"), "3rd-age-platebody");
        assert_eq!(slugify("Coal bag - full"), "coal-bag-full");
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(slugify("  Rune \t  2h\nsword  "), "rune-2h-sword");
    }

    #[test]
    fn trim_happens_before_stripping() {
        assert_eq!(slugify("Ring !"), "ring-");
        assert_eq!(slugify("! Ring"), "-ring");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(slugify("Café bowl"), "caf-bowl");
    }

    #[test]
    fn empty_and_symbol_only_names() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("???"), "");
        assert_eq!(page_file_name("???"), ".html");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "Abyssal whip",
            "  Rune \t  2h\nsword  ",
            "Ring !",
            "a -- b",
            "Dragon dagger(p++)",
            "Café bowl",
            "___",
            "-",
            "İstanbul rock",
        ];
        for s in samples {
            let once = slugify(s);
            assert_eq!(slugify(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn alphanumeric_input_never_yields_stray_hyphens() {
        let samples = ["a b", "  a   b  ", "Rune  pickaxe 2", "\tx\n\ny\t", "abc", " 1 2 3 "];
        for s in samples {
            let slug = slugify(s);
            assert!(!slug.contains("--"), "{slug:?}");
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{slug:?}");
        }
    }

    #[test]
    fn path_and_url_share_the_slug() {
        let path = item_path(Path::new("out/items"), "Abyssal whip");
        assert_eq!(path, PathBuf::from("out/items/abyssal-whip.html"));
        assert_eq!(
            item_url("https://www.osrs.lol", "Abyssal whip"),
            "https://www.osrs.lol/items/abyssal-whip.html"
        );
    }
}
