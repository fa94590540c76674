//! Screen dump: show how configuration changes reshape the window tree.

use mullion::{LayoutContext, ScreenConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut ctx = LayoutContext::new();
    ctx.set_root_size(24, 80);
    let root = ctx.handles().root;

    println!("Default screen (80x24)");
    println!("======================");
    print!("{}", ctx.tree().dump(root));
    println!();

    ctx.apply_config(&ScreenConfig {
        status_on_top: true,
        show_sidebar: true,
        sidebar_cols: 20,
        ..ScreenConfig::default()
    });
    println!("Status on top, sidebar shown");
    println!("============================");
    print!("{}", ctx.tree().dump(root));
    println!();

    ctx.apply_config(&ScreenConfig {
        show_preview: true,
        split_rows: 6,
        ..ScreenConfig::default()
    });
    println!("Preview open, 6 content rows kept");
    println!("=================================");
    print!("{}", ctx.tree().dump(root));
}
