//! Line-oriented interactive menu around a [DecisionTree].
//!
//! [Console] reads trimmed lines from any [BufRead] and writes prompts to any
//! [Write], so the same code drives stdin/stdout in the binary and in-memory
//! buffers in tests. Available modes:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `traversal` | play one [GuessSession] |
//! | `difference` | compare two characters by their properties |
//! | `write tree` | save the tree to a file |
//! | `show tree` | write a Graphviz DOT file of the tree |
//! | `exit` | leave the menu |

use crate::dot::{DOT_EXTENSION, write_dot_file};
use crate::format::{FormatStyle, write_file};
use crate::model::{Comparison, DecisionTree};
use crate::session::{GuessSession, Outcome};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const MENU: &str = "Available modes:\n\
                    traversal\n\
                    difference\n\
                    write tree\n\
                    show tree\n\
                    Write one to start (or exit): ";

/// Whether the menu keeps running after a mode finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu over a borrowed tree.
///
/// # Example
/// ```
/// use akitree::console::Console;
/// use akitree::model::DecisionTree;
/// use std::io::Cursor;
///
/// let mut tree = DecisionTree::new_default();
/// let input = Cursor::new("traversal\nn\nhas stripes\nzebra\nexit\n");
/// let mut output = Vec::new();
/// Console::new(&mut tree, input, &mut output).run().unwrap();
///
/// assert_eq!(tree.num_nodes(), 3);
/// assert_eq!(tree.label(0), "has stripes");
/// ```
pub struct Console<'t, R: BufRead, W: Write> {
    tree: &'t mut DecisionTree,
    input: R,
    output: W,
    style: FormatStyle,
}

impl<'t, R: BufRead, W: Write> Console<'t, R, W> {
    /// Creates a console reading from `input` and writing to `output`.
    pub fn new(tree: &'t mut DecisionTree, input: R, output: W) -> Self {
        Console {
            tree,
            input,
            output,
            style: FormatStyle::default(),
        }
    }

    /// Sets the [FormatStyle] used by `write tree`.
    pub fn with_style(mut self, style: FormatStyle) -> Self {
        self.style = style;
        self
    }

    /// Runs the menu until `exit` or end of input.
    ///
    /// # Errors
    /// Returns an I/O error only if reading input or writing prompts fails.
    /// Failing to save a file is reported to the user and the menu continues.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            write!(self.output, "{MENU}")?;
            let Some(command) = self.read_line()? else {
                return Ok(());
            };

            let flow = match command.as_str() {
                "traversal" => self.traversal_mode()?,
                "difference" => self.difference_mode()?,
                "write tree" => self.write_tree_mode()?,
                "show tree" => self.show_tree_mode()?,
                "exit" => Flow::Exit,
                other => {
                    writeln!(self.output, "Unknown mode {other:?}")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Plays one guessing round.
    fn traversal_mode(&mut self) -> io::Result<Flow> {
        let mut session = GuessSession::new(self.tree);
        while let Some(prompt) = session.prompt() {
            write!(self.output, "{prompt}")?;
            let Some(line) = read_trimmed_line(&mut self.input, &mut self.output)? else {
                return Ok(Flow::Exit);
            };
            if let Err(err) = session.answer(&line) {
                writeln!(self.output, "{err}")?;
            }
        }

        match session.outcome() {
            Some(Outcome::Guessed(_)) => writeln!(self.output, "I guessed it!")?,
            Some(Outcome::Learned(outcome)) => writeln!(
                self.output,
                "I will remember {}.",
                session.tree().label(outcome.no_leaf)
            )?,
            None => {}
        }
        Ok(Flow::Continue)
    }

    /// Prints shared and unique properties of two characters.
    fn difference_mode(&mut self) -> io::Result<Flow> {
        let mut leaves = [0; 2];
        for (slot, ordinal) in leaves.iter_mut().zip(["first", "second"]) {
            write!(self.output, "Enter {ordinal} character: ")?;
            let Some(name) = self.read_line()? else {
                return Ok(Flow::Exit);
            };
            match self.tree.lookup_leaf(&name) {
                Ok(leaf) => *slot = leaf,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    return Ok(Flow::Continue);
                }
            }
        }

        let comparison = self.tree.compare(leaves[0], leaves[1]);
        self.print_comparison(&comparison)?;
        Ok(Flow::Continue)
    }

    fn print_comparison(&mut self, comparison: &Comparison) -> io::Result<()> {
        writeln!(
            self.output,
            "Common properties: {}",
            self.tree.properties_text(&comparison.common)
        )?;
        writeln!(
            self.output,
            "First character's unique properties: {}",
            self.tree.properties_text(&comparison.first_only)
        )?;
        writeln!(
            self.output,
            "Second character's unique properties: {}",
            self.tree.properties_text(&comparison.second_only)
        )
    }

    /// Saves the tree under a file name read from input.
    fn write_tree_mode(&mut self) -> io::Result<Flow> {
        write!(self.output, "Write filename for tree: ")?;
        let Some(path) = self.read_line()? else {
            return Ok(Flow::Exit);
        };
        match write_file(self.tree, &path, self.style) {
            Ok(()) => writeln!(self.output, "Saved tree to {path}")?,
            Err(err) => writeln!(self.output, "Could not save tree to {path}: {err}")?,
        }
        Ok(Flow::Continue)
    }

    /// Writes a DOT file under a base name read from input.
    fn show_tree_mode(&mut self) -> io::Result<Flow> {
        write!(self.output, "Write filename for tree picture: ")?;
        let Some(name) = self.read_line()? else {
            return Ok(Flow::Exit);
        };
        let dot_path = PathBuf::from(format!("{name}.{DOT_EXTENSION}"));
        match write_dot_file(self.tree, &dot_path) {
            Ok(()) => writeln!(
                self.output,
                "Wrote {}, render it with: dot -Tpng {} -o {name}.png",
                dot_path.display(),
                dot_path.display()
            )?,
            Err(err) => writeln!(self.output, "Could not write {}: {err}", dot_path.display())?,
        }
        Ok(Flow::Continue)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        read_trimmed_line(&mut self.input, &mut self.output)
    }
}

/// Flushes pending prompt text, then reads the next non-blank line, trimmed.
/// Returns `None` at end of input.
fn read_trimmed_line<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<String>> {
    output.flush()?;
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(Some(trimmed.to_string()));
        }
    }
}
