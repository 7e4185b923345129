use std::io::Write;
use std::path::PathBuf;

use avl_tree::{AvlTree, Key, TreeError};

use crate::config::Config;
use crate::error::{CommandError, StoreError, UsageError};
use crate::store::Store;

pub const USAGE: &str = "\
Usage: avldb [--db-dir <dir>] [--log-dir <dir>] <command>

Commands:
  add <key> <name>   Add a key to the AVL tree stored in <name>.
  show <name>        Show the AVL tree stored in <name>.

Options:
  --db-dir <dir>     Directory holding tree files (default ./DB, env AVLDB_DB_DIR).
  --log-dir <dir>    Directory for tree.log (default ./logs, env AVLDB_LOG_DIR).
  -h, --help         Print this help.
";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Add { key: Key, name: String },
    Show { name: String },
    Help,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cli {
    pub command: Command,
    pub db_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Command-line directories take precedence over `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.db_dir {
            config.db_dir = dir.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
        }
    }
}

/// Parses arguments, excluding the program name.
pub fn parse<I>(args: I) -> Result<Cli, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut db_dir = None;
    let mut log_dir = None;
    let mut positional = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Ok(Cli {
                    command: Command::Help,
                    db_dir,
                    log_dir,
                });
            }
            "--db-dir" => {
                let dir = args.next().ok_or(UsageError::MissingValue("--db-dir"))?;
                db_dir = Some(PathBuf::from(dir));
            }
            "--log-dir" => {
                let dir = args.next().ok_or(UsageError::MissingValue("--log-dir"))?;
                log_dir = Some(PathBuf::from(dir));
            }
            flag if flag.starts_with("--") => {
                return Err(UsageError::UnexpectedArgument(flag.to_owned()));
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        None => return Err(UsageError::MissingCommand),
        Some("add") => {
            let key = positional.next().ok_or(UsageError::MissingArgument("key"))?;
            let key = key.parse::<Key>().map_err(|_| UsageError::InvalidKey(key))?;
            let name = positional.next().ok_or(UsageError::MissingArgument("name"))?;
            Command::Add { key, name }
        }
        Some("show") => {
            let name = positional.next().ok_or(UsageError::MissingArgument("name"))?;
            Command::Show { name }
        }
        Some(other) => return Err(UsageError::UnknownCommand(other.to_owned())),
    };
    if let Some(extra) = positional.next() {
        return Err(UsageError::UnexpectedArgument(extra));
    }

    Ok(Cli {
        command,
        db_dir,
        log_dir,
    })
}

/// Runs `command` against `store`, printing trees to `out`.
///
/// Returns `Ok(false)` when `show` finds no file.
pub fn run<W: Write>(command: &Command, store: &Store, out: &mut W) -> Result<bool, CommandError> {
    match command {
        Command::Help => {
            out.write_all(USAGE.as_bytes())?;
            Ok(true)
        }
        Command::Add { key, name } => add(*key, name, store, out),
        Command::Show { name } => {
            if !store.exists(name)? {
                writeln!(out, "DB file {name} doesn't exist.")?;
                return Ok(false);
            }
            let tree = store.load(name)?;
            write!(out, "{tree}")?;
            Ok(true)
        }
    }
}

fn add<W: Write>(key: Key, name: &str, store: &Store, out: &mut W) -> Result<bool, CommandError> {
    if !store.exists(name)? {
        let tree = AvlTree::new(key);
        store.save(name, &tree)?;
        write!(out, "{tree}")?;
        return Ok(true);
    }

    let mut tree = store.load(name)?;
    match tree.insert(key) {
        Ok(()) => {
            store.save(name, &tree)?;
            let saved = store.load(name)?;
            write!(out, "{saved}")?;
        }
        Err(TreeError::DuplicateKey(_)) => {
            log::warn!("Key {key} already exists in {name}, nothing stored.");
            writeln!(out, "Key {key} already exists.")?;
            write!(out, "{tree}")?;
        }
        Err(source) => {
            let path = store.path_for(name)?;
            return Err(StoreError::Tree { path, source }.into());
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use rstest::rstest;

    use super::{Cli, Command, parse, run};
    use crate::config::Config;
    use crate::error::UsageError;
    use crate::store::Store;
    use crate::test_support::TempDir;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(str::to_owned).collect()
    }

    #[test]
    fn parses_add_with_negative_key() {
        let cli = parse(args("add -5 tree.txt")).unwrap();
        assert_eq!(
            cli.command,
            Command::Add {
                key: -5,
                name: "tree.txt".to_owned()
            }
        );
        assert_eq!(cli.db_dir, None);
    }

    #[test]
    fn parses_dirs_anywhere() {
        let cli = parse(args("show --db-dir /tmp/db tree.txt --log-dir /tmp/logs")).unwrap();
        assert_eq!(
            cli,
            Cli {
                command: Command::Show {
                    name: "tree.txt".to_owned()
                },
                db_dir: Some(PathBuf::from("/tmp/db")),
                log_dir: Some(PathBuf::from("/tmp/logs")),
            }
        );

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.db_dir, PathBuf::from("/tmp/db"));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/logs"));
    }

    #[rstest]
    #[case("", UsageError::MissingCommand)]
    #[case("drop tree.txt", UsageError::UnknownCommand("drop".to_owned()))]
    #[case("add", UsageError::MissingArgument("key"))]
    #[case("add 5", UsageError::MissingArgument("name"))]
    #[case("add five tree.txt", UsageError::InvalidKey("five".to_owned()))]
    #[case("show", UsageError::MissingArgument("name"))]
    #[case("show a b", UsageError::UnexpectedArgument("b".to_owned()))]
    #[case("show a --db-dir", UsageError::MissingValue("--db-dir"))]
    #[case("--force show a", UsageError::UnexpectedArgument("--force".to_owned()))]
    fn rejects_bad_arguments(#[case] line: &str, #[case] expected: UsageError) {
        assert_eq!(parse(args(line)), Err(expected));
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse(args("add x -h")).unwrap().command, Command::Help);
    }

    #[test]
    fn add_then_show() {
        let dir = TempDir::new("cli");
        let store = Store::new(&Config {
            db_dir: dir.path().to_path_buf(),
            ..Config::default()
        });

        let mut out = Vec::new();
        let show = Command::Show {
            name: "tree.txt".to_owned(),
        };
        assert!(!run(&show, &store, &mut out).unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "DB file tree.txt doesn't exist.\n");

        for key in [30, 20, 10] {
            let add = Command::Add {
                key,
                name: "tree.txt".to_owned(),
            };
            let mut out = Vec::new();
            assert!(run(&add, &store, &mut out).unwrap());
        }
        assert_eq!(
            std::fs::read_to_string(dir.path().join("tree.txt")).unwrap(),
            "20,10,30"
        );

        let mut out = Vec::new();
        let dup = Command::Add {
            key: 10,
            name: "tree.txt".to_owned(),
        };
        assert!(run(&dup, &store, &mut out).unwrap());
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Key 10 already exists.\n"));

        let mut out = Vec::new();
        assert!(run(&show, &store, &mut out).unwrap());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Root: 20\n    Left: 10\n    Right: 30\n"
        );
    }
}
