use dirsh::core::commands::CommandExecutor;
use dirsh::core::config::{Config, ConfigPaths};
use dirsh::core::state::DirectoryState;
use dirsh::error::ShellError;
use dirsh::flags::Flags;
use dirsh::highlight::SyntaxHighlighter;
use dirsh::input::{EditorSource, ReaderSource, ShellCompleter};
use dirsh::logging;
use dirsh::path::PathResolver;
use dirsh::shell::{Shell, ShellOptions};
use std::env;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

fn main() -> Result<(), ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        println!("dirsh {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    logging::init(flags.is_set("debug"))?;

    let paths = ConfigPaths::new(flags.get_value("config").map(String::as_str))?;
    let mut config = Config::load(&paths)?;
    config.apply_flags(&flags);

    let resolver = PathResolver::new();
    let start = start_directory(&config, &resolver)?;
    let state = DirectoryState::new(&start, resolver)?;
    let options = ShellOptions::from_config(&config, flags.is_set("quiet"));

    ctrlc::set_handler(move || {
        println!("\nUse 'exit' to exit the shell");
    })?;

    if io::stdin().is_terminal() {
        let highlighter = if config.color {
            SyntaxHighlighter::new()
        } else {
            SyntaxHighlighter::plain()
        };
        let completer = ShellCompleter::new(CommandExecutor::new().names(), highlighter);
        let source = EditorSource::new(completer, config.history_file.clone(), config.history_size)?;
        Shell::new(source, io::stdout(), state, options).run()
    } else {
        let source = ReaderSource::new(io::stdin().lock());
        Shell::new(source, io::stdout(), state, options).run()
    }
}

fn start_directory(config: &Config, resolver: &PathResolver) -> Result<PathBuf, ShellError> {
    let start = match &config.start_dir {
        Some(dir) => dir.clone(),
        None => resolver
            .home_dir()
            .map_err(|_| ShellError::HomeDirNotFound)?
            .to_path_buf(),
    };

    if start.is_relative() {
        Ok(env::current_dir()?.join(start))
    } else {
        Ok(start)
    }
}
