//! Theme switching walkthrough.
//!
//! Builds a small in-memory asset tree, applies a theme, and prints how
//! paths, colors, and strings resolve before and after switching themes.
//!
//! Run with: RUST_LOG=debug cargo run -p horizon-lattice-resources --example theme_switch

use horizon_lattice_resources::prelude::*;
use tracing_subscriber::EnvFilter;

fn assets() -> MemorySource {
    MemorySource::new()
        .with_file("picture/button.png", "base")
        .with_file("theme/cyberpunk/picture/button.png", "cyberpunk")
        .with_file(
            "theme/cyberpunk/values/color.xml",
            r##"<resources>
    <color name="accent" value="#FF2A6D"/>
    <color name="panel" value="#05D9E8CC"/>
</resources>"##,
        )
        .with_file(
            "theme/cyberpunk/lang/strings_en.properties",
            "welcome=Jack in, {0}.\nquit=Disconnect\n",
        )
        .with_file(
            "xml/strings.xml",
            r#"<resources><string name="quit" value="Quit"/></resources>"#,
        )
}

fn report(resolver: &ResourceResolver) {
    println!("theme: {}", resolver.active_theme().unwrap_or("(none)"));

    let path = resolver.resolve_asset_path_detailed("picture/button.png");
    println!("  picture/button.png -> {} ({:?})", path.value, path.origin);

    for expr in ["@color/accent", "@color/panel", "#222", "0.5,0.5,0.5", "salmon"] {
        let color = resolver.resolve_color_detailed(Some(expr));
        println!("  {:<14} -> {} ({:?})", expr, color.value, color.origin);
    }

    for expr in ["@string/welcome", "@string/quit", "@string/missing"] {
        let text = resolver.resolve_text_detailed(Some(expr), &[&"Ada"]);
        println!("  {:<16} -> {:?} ({:?})", expr, text.value, text.origin);
    }
}

fn main() -> horizon_lattice_resources::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut resolver = ResourceResolver::new(assets());
    resolver.set_default_locale(Locale::parse("en"));
    resolver.load_fallback_strings("xml/strings.xml");

    resolver.apply_theme("cyberpunk", "theme")?;
    report(&resolver);

    resolver.set_active_color_theme("classic");
    report(&resolver);

    Ok(())
}
