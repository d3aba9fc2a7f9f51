use gt_render::manual::render_manual;

use crate::cli::GlobalFlags;
use crate::ui;

pub fn handle(_flags: &GlobalFlags) -> anyhow::Result<()> {
    println!("{}", render_manual(ui::prefs().style()));
    Ok(())
}
