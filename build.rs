use shadow_rs::BuildPattern;
use shadow_rs::ShadowBuilder;

// Build metadata for `--version`.
fn main() -> std::io::Result<()> {
    ShadowBuilder::builder()
        .build_pattern(BuildPattern::Lazy)
        .deny_const(Default::default())
        .build()
        .map_err(std::io::Error::other)?;

    Ok(())
}
