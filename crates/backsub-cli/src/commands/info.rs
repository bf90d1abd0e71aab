use anyhow::Result;
use backsub_core::io::sequence::FrameLoader;
use clap::Args;

use super::stats::SequenceArgs;

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub sequence: SequenceArgs,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let seq = args.sequence.sequence();
    let loader = FrameLoader::new(seq, args.sequence.width, args.sequence.height);
    let indices = loader.indices();

    println!("Directory:   {}", loader.sequence().directory.display());
    println!("Frames:      {}", loader.frame_count());
    if !indices.is_empty() {
        println!("First:       {}", loader.sequence().file_name(indices.start));
        println!("Last:        {}", loader.sequence().file_name(indices.end - 1));
    }
    println!(
        "Dimensions:  {}x{}",
        args.sequence.width, args.sequence.height
    );

    let missing = loader.missing_indices();
    if missing.is_empty() {
        println!("Status:      all frames present");
        // Decode the first frame so a size mismatch shows up before a long run
        if let Some(first) = loader.indices().next() {
            match loader.load(first) {
                Ok(_) => println!("First frame: ok"),
                Err(e) => println!("First frame: {}", e),
            }
        }
    } else {
        println!("Status:      {} missing", missing.len());
        for index in missing {
            println!("  missing {}", loader.path_for(index).display());
        }
    }

    Ok(())
}
