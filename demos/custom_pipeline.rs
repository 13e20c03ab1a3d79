use cartoonify::Pipeline;
use cartoonify::cartoon::steps::*;
use cartoonify::load_image;
use std::env;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image_path>", args[0]);
        std::process::exit(1);
    }

    let img = load_image(&args[1])?;
    println!("Loaded image: {}x{}", img.width(), img.height());

    // Edges only: stop before the colour branch
    let edges_only = Pipeline::new()
        .with_verbose(true)
        .add_step_boxed(Box::new(GrayscaleStep))
        .add_step_boxed(Box::new(MedianBlurStep { radius: 3 }))
        .add_step_boxed(Box::new(AdaptiveThresholdStep {
            block_size: 15,
            offset: 4,
        }));
    let run = edges_only.run(img.clone())?;
    run.output.image.save("edges.png")?;
    println!("Saved edges.png after {} stages", run.stages.len());

    // Softer cartoon: smaller bilateral window, lower colour sigma
    let soft = Pipeline::new()
        .add_step_boxed(Box::new(GrayscaleStep))
        .add_step_boxed(Box::new(MedianBlurStep { radius: 2 }))
        .add_step_boxed(Box::new(AdaptiveThresholdStep {
            block_size: 9,
            offset: 2,
        }))
        .add_step_boxed(Box::new(BilateralFilterStep {
            diameter: 5,
            sigma_color: 75.0,
            sigma_space: 75.0,
        }))
        .add_step_boxed(Box::new(MaskStep));
    let run = soft.run(img.clone())?;
    run.output.image.save("soft_cartoon.png")?;
    println!("Saved soft_cartoon.png");

    // Partial run for debugging
    let partial = soft.run_partial(img, 2)?;
    println!(
        "Partial run stopped at '{}'",
        partial.stages.last().map(|s| s.stage.name.as_str()).unwrap_or("nothing")
    );

    Ok(())
}
