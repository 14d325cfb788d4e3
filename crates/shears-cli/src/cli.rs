use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "shears")]
#[command(about = "Prunes a parsed stylesheet tree down to its override-relevant slice")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reduce a parsed stylesheet tree against an override variables file
    Reduce {
        /// JSON syntax tree produced by the stylesheet parser, `-` for stdin
        input: String,

        /// Override variable definitions (SCSS source)
        #[arg(long)]
        vars_file: String,

        /// Base directory for resolving a relative --vars-file
        #[arg(long)]
        cwd: Option<String>,

        /// Rewrite override reads into template placeholders and compile
        #[arg(long)]
        templatize: bool,

        /// Compiler command for --templatize; receives the reduced
        /// stylesheet on stdin and must print CSS on stdout
        #[arg(long)]
        compiler: Option<String>,

        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}
