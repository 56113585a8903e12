//! Integration tests for theme resolution over an on-disk asset tree.

use std::fs;
use std::path::Path;

use horizon_lattice_resources::prelude::*;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Builds an asset tree with a `cyberpunk` theme and shared language files.
fn asset_tree() -> TempDir {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(root, "picture/button.png", "base-button");
    write(root, "picture/logo.png", "base-logo");
    write(root, "theme/cyberpunk/picture/button.png", "cyber-button");
    write(
        root,
        "theme/cyberpunk/values/color.xml",
        r##"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <color name="accent" value="#FF00FF"/>
    <color name="panel">#1A1A33E6</color>
    <color name="broken" value="not-a-color"/>
</resources>"##,
    );
    write(
        root,
        "theme/cyberpunk/lang/strings_zh_TW.properties",
        "welcome=歡迎, {0}\nscore=分數: {0}\n",
    );

    write(root, "i18n/strings.properties", "welcome=Welcome, {0}\nquit=Quit\n");
    write(root, "i18n/strings_zh.properties", "quit=離開\n");
    write(
        root,
        "xml/strings.xml",
        r#"<resources>
    <string name="quit" value="Exit"/>
    <string name="about">About this game</string>
</resources>"#,
    );

    dir
}

fn resolver(dir: &TempDir) -> ResourceResolver {
    let mut resolver = ResourceResolver::new(DirectorySource::new(dir.path()));
    resolver.set_default_locale(Locale::parse("zh_TW"));
    resolver
}

#[test]
fn test_apply_theme_loads_colors_and_strings() {
    let dir = asset_tree();
    let mut resolver = resolver(&dir);
    resolver.apply_theme("cyberpunk", "theme").unwrap();

    assert_eq!(resolver.active_theme(), Some("cyberpunk"));
    assert_eq!(resolver.theme_folder(), Some("theme"));
    assert!(resolver.is_theme_folder_locked());

    assert_eq!(resolver.get_color("accent"), Color::from_hex("#FF00FF").unwrap());
    assert_eq!(resolver.get_color("panel"), Color::from_rgba8(0x1A, 0x1A, 0x33, 0xE6));
    assert_eq!(resolver.get_color("broken"), Color::WHITE);
    assert_eq!(resolver.colors().theme_len("cyberpunk"), 2);

    assert!(resolver.has_bundle());
    assert_eq!(resolver.get_string("score"), "分數: {0}");
    assert_eq!(resolver.resolve_text(Some("@string/welcome"), &[&"Ada"]), "歡迎, Ada");
}

#[test]
fn test_themed_asset_paths() {
    let dir = asset_tree();
    let mut resolver = resolver(&dir);
    resolver.apply_theme("cyberpunk", "theme").unwrap();

    let button = resolver.resolve_asset_path_detailed("picture/button.png");
    assert_eq!(button.value, "theme/cyberpunk/picture/button.png");
    assert_eq!(button.origin, Origin::Theme);

    let logo = resolver.resolve_asset_path_detailed("picture/logo.png");
    assert_eq!(logo.value, "picture/logo.png");
    assert_eq!(logo.origin, Origin::Default);

    assert_eq!(resolver.texture("picture/button.png").unwrap().bytes(), b"cyber-button");
    assert_eq!(resolver.texture("picture/logo.png").unwrap().bytes(), b"base-logo");
    assert!(resolver.texture("picture/missing.png").is_err());
}

#[test]
fn test_theme_switch_clears_texture_cache() {
    let dir = asset_tree();
    let mut resolver = resolver(&dir);
    resolver.apply_theme("cyberpunk", "theme").unwrap();

    resolver.texture("picture/button.png").unwrap();
    assert_eq!(resolver.textures().len(), 1);

    assert!(!resolver.set_active_color_theme("cyberpunk"));
    assert_eq!(resolver.textures().len(), 1);

    assert!(resolver.set_active_color_theme("classic"));
    assert!(resolver.textures().is_empty());
    assert_eq!(
        resolver.texture("picture/button.png").unwrap().bytes(),
        b"base-button"
    );
}

#[test]
fn test_theme_folder_configures_once() {
    let dir = asset_tree();
    let mut resolver = resolver(&dir);
    resolver.apply_theme("cyberpunk", "theme").unwrap();

    let err = resolver.apply_theme("classic", "theme").unwrap_err();
    assert!(matches!(err, Error::ThemeAlreadyConfigured { .. }));
    assert_eq!(err.code(), 1001);

    // The theme switch before the failure sticks.
    assert_eq!(resolver.active_theme(), Some("classic"));
    assert_eq!(resolver.theme_folder(), Some("theme"));
}

#[test]
fn test_missing_theme_files_keep_previous_state() {
    let dir = asset_tree();
    let mut resolver = resolver(&dir);
    resolver.load_all_localized_resources("i18n/strings", "xml/strings.xml", &Locale::parse("zh_TW"));
    resolver.apply_theme("classic", "theme").unwrap();

    assert!(!resolver.colors().has_theme("classic"));
    assert_eq!(resolver.get_color("accent"), Color::WHITE);
    // The shared bundle survives the missing theme language file.
    assert_eq!(resolver.get_string("quit"), "離開");
}

#[test]
fn test_string_fallback_chain() {
    let dir = asset_tree();
    let mut resolver = resolver(&dir);

    assert_eq!(resolver.get_string_detailed("quit").origin, Origin::Default);

    assert!(resolver.load_fallback_strings("xml/strings.xml"));
    let quit = resolver.get_string_detailed("quit");
    assert_eq!(quit.value, "Exit");
    assert_eq!(quit.origin, Origin::FallbackTable);

    assert!(resolver.load_localized_bundle("i18n/strings", &Locale::parse("zh_TW")));
    let quit = resolver.get_string_detailed("quit");
    assert_eq!(quit.value, "離開");
    assert_eq!(quit.origin, Origin::Bundle);

    assert_eq!(resolver.get_string("about"), "About this game");
    assert_eq!(resolver.get_string("nope"), "nope");
}

#[test]
fn test_failed_bundle_load_keeps_previous_bundle() {
    let dir = asset_tree();
    let mut resolver = resolver(&dir);
    resolver.set_default_locale(Locale::parse("en"));
    assert!(resolver.load_localized_bundle("i18n/strings", &Locale::parse("en")));
    assert!(!resolver.load_localized_bundle("i18n/missing", &Locale::parse("en")));
    assert_eq!(resolver.get_string("quit"), "Quit");
}

#[test]
fn test_bundle_falls_back_to_default_locale() {
    let dir = asset_tree();
    let mut resolver = resolver(&dir);

    // No French file, so the default zh_TW chain wins over the root file.
    assert!(resolver.load_localized_bundle("i18n/strings", &Locale::parse("fr")));
    assert_eq!(resolver.get_string("quit"), "離開");
    assert_eq!(resolver.get_string("welcome"), "Welcome, {0}");

    resolver.set_default_locale(Locale::parse("de"));
    assert!(resolver.load_localized_bundle("i18n/strings", &Locale::parse("fr")));
    assert_eq!(resolver.get_string("quit"), "Quit");
}

#[test]
fn test_bundle_with_escaped_emoji() {
    let dir = asset_tree();
    write(
        dir.path(),
        "i18n/emoji.properties",
        "title=Hi\nemoji=\\uD83D\\uDE00\n",
    );
    let mut resolver = resolver(&dir);

    assert!(resolver.load_localized_bundle("i18n/emoji", &Locale::parse("en")));
    assert_eq!(resolver.get_string("title"), "Hi");
    assert_eq!(resolver.get_string_detailed("emoji").value, "\u{1F600}");
    assert_eq!(resolver.get_string_detailed("emoji").origin, Origin::Bundle);
}

#[test]
fn test_text_formatting() {
    let dir = asset_tree();
    let mut resolver = resolver(&dir);

    // Without a bundle, templates come back verbatim.
    assert_eq!(resolver.resolve_text(Some("Score {0}"), &[&10]), "Score {0}");

    resolver.load_localized_bundle("i18n/strings", &Locale::parse("en"));
    let literal = resolver.resolve_text_detailed(Some("Score {0}"), &[&10]);
    assert_eq!(literal.value, "Score 10");
    assert_eq!(literal.origin, Origin::Literal);

    let quoted = resolver.resolve_text(Some("'{0}' is {0}"), &[&"zero"]);
    assert_eq!(quoted, "{0} is zero");

    let failed = resolver.resolve_text_detailed(Some("{0} of {1}"), &[&1]);
    assert_eq!(failed.value, "{0} of {1}");
    assert_eq!(failed.origin, Origin::Unformatted);
    assert!(failed.is_degraded());
}

#[test]
fn test_color_expressions() {
    let dir = asset_tree();
    let mut resolver = resolver(&dir);
    resolver.apply_theme("cyberpunk", "theme").unwrap();

    assert_eq!(resolver.resolve_color(Some("@color/accent")), resolver.get_color("accent"));
    assert_eq!(resolver.resolve_color(Some("#00FF00")), Color::GREEN);
    assert_eq!(resolver.resolve_color(Some("1,0,0")), Color::RED);
    assert_eq!(resolver.resolve_color(Some("teal")), Color::WHITE);
    assert_eq!(resolver.resolve_color(None), Color::WHITE);

    let literal = resolver.resolve_color_detailed(Some("0,0,1,0.5"));
    assert_eq!(literal.value, Color::new(0.0, 0.0, 1.0, 0.5));
    assert_eq!(literal.origin, Origin::Literal);
}

#[test]
fn test_from_config() {
    let dir = asset_tree();
    let config = ResolverConfig::new(dir.path())
        .with_theme("cyberpunk", "theme")
        .with_locale("zh_TW")
        .with_i18n_base("i18n/strings")
        .with_fallback_strings("xml/strings.xml")
        .with_texture_cache_limit(4);

    let resolver = ResourceResolver::from_config(&config).unwrap();
    assert_eq!(resolver.default_locale(), &Locale::parse("zh_TW"));
    assert_eq!(resolver.active_theme(), Some("cyberpunk"));
    assert_eq!(resolver.get_color("accent"), Color::from_hex("FF00FF").unwrap());

    // The theme language file replaced the shared bundle.
    assert_eq!(resolver.get_string("score"), "分數: {0}");
    assert_eq!(resolver.get_string("quit"), "Exit");
}

#[test]
fn test_from_config_file() {
    let dir = asset_tree();
    let path = dir.path().join("resources.toml");
    fs::write(
        &path,
        "asset_root = \".\"\ntheme = \"cyberpunk\"\ntheme_folder = \"theme\"\nlocale = \"en\"\n",
    )
    .unwrap();

    let config = ResolverConfig::load(&path).unwrap();
    let resolver = ResourceResolver::from_config(&config).unwrap();
    assert_eq!(
        resolver.resolve_asset_path("picture/button.png"),
        "theme/cyberpunk/picture/button.png"
    );
    // No en language file under the theme, so no bundle is loaded.
    assert!(!resolver.has_bundle());
}
