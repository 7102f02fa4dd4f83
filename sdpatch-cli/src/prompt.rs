// sdpatch-cli/src/prompt.rs
//
// Interactive region selection. The core only needs one rectangle per batch
// run; without a --region argument the operator is pointed at the extracted
// reference frame and asked to type the rectangle in.

use std::io::{self, Write};
use std::path::Path;

use sdpatch_core::error::{CoreError, CoreResult};
use sdpatch_core::region::{RegionProvider, WatermarkRegion};

/// Region provider that prompts the operator on stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptRegionProvider;

impl RegionProvider for PromptRegionProvider {
    fn select_region(&self, reference_frame: &Path) -> CoreResult<WatermarkRegion> {
        println!(
            "Reference frame extracted to: {}",
            reference_frame.display()
        );
        println!("Open it in an image viewer and measure the watermark rectangle.");
        print!("Watermark region as X,Y,W,H: ");
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        line.trim()
            .parse::<WatermarkRegion>()
            .map_err(CoreError::InvalidRegion)
    }
}
