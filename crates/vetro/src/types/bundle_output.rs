use vetro_common::OutputAsset;

/// Final output of the bundling process. Inputs -> Modules -> Chunks -> Assets.
#[derive(Debug)]
pub struct BundleOutput {
  pub assets: Vec<OutputAsset>,
  pub warnings: Vec<anyhow::Error>,
}
