//! Overlay stack: push and pop dialog panels over the default screen.

use mullion::{LayoutContext, Orientation, SizePolicy, UNLIMITED};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut ctx = LayoutContext::new();
    ctx.set_root_size(24, 80);
    let root = ctx.handles().root;

    println!("Base screen");
    println!("===========");
    print!("{}", ctx.tree().dump(root));
    println!();

    let confirm = ctx.tree_mut().create(
        Orientation::Vertical,
        SizePolicy::Maximise,
        UNLIMITED,
        UNLIMITED,
    );
    ctx.tree_mut().set_label(confirm, "confirm-dialog");
    ctx.dialog_push(confirm);
    ctx.reflow();

    println!("Dialog pushed (covers the screen)");
    println!("=================================");
    print!("{}", ctx.tree().dump(root));
    println!();

    let popped = ctx.dialog_pop();
    ctx.reflow();
    println!("Dialog popped (screen restored)");
    println!("===============================");
    print!("{}", ctx.tree().dump(root));

    // The popped panel is ours to free.
    if let Some(panel) = popped {
        ctx.tree_mut().free(panel);
    }
}
