use anyhow::Result;
use clap::{Parser, Subcommand};
use clipify::config::AppConfig;
use clipify::model::VideoBrief;
use clipify::pipeline::Pipeline;
use clipify::progress::NdjsonSink;
use clipify::script::ScriptWriter;

#[derive(Parser)]
#[command(name = "clipify")]
#[command(about = "Clipify - brief to narrated vertical video", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline, streaming NDJSON progress to stdout
    Generate {
        /// Subject of the video
        #[arg(long)]
        topic: String,

        /// Free-form description the script body is drawn from
        #[arg(long, default_value = "")]
        description: String,

        /// Target duration in seconds
        #[arg(short, long, default_value_t = 30)]
        duration: u32,

        /// Narrative tone (informative, motivational, storytelling)
        #[arg(long, default_value = "informative")]
        tone: String,

        /// Narrator voice (male, female, or an espeak variant)
        #[arg(long, default_value = "female")]
        voice: String,

        /// Narration language code
        #[arg(long, default_value = "en")]
        language: String,
    },
    /// Print the generated script without producing any media
    Script {
        /// Subject of the video
        #[arg(long)]
        topic: String,

        /// Free-form description the script body is drawn from
        #[arg(long, default_value = "")]
        description: String,

        /// Narrative tone (informative, motivational, storytelling)
        #[arg(long, default_value = "informative")]
        tone: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Commands::Generate {
            topic,
            description,
            duration,
            tone,
            voice,
            language,
        } => {
            let brief = VideoBrief {
                topic,
                description,
                duration,
                tone,
                voice,
                language,
            };
            let stdout = std::io::stdout();
            let mut sink = NdjsonSink::new(stdout.lock());
            // Pipeline failures surface as a failure frame, not an exit code
            Pipeline::new(config).run(&brief, &mut sink)?;
        }
        Commands::Script {
            topic,
            description,
            tone,
        } => {
            let brief = VideoBrief {
                topic,
                description,
                tone,
                ..VideoBrief::default()
            };
            println!("{}", ScriptWriter::compose(&brief));
        }
    }

    Ok(())
}
