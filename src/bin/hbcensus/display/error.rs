use std::io::{self, Write};

use anyhow::Error;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_io_hints(err);
        collector.collect_survey_hints(err);

        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use hbond_census::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => {
                self.collect_std_io_hints(source);
            }

            IoError::Parse { line, .. } => {
                self.add(format!("Header record malformed near line {}", line));
                self.add("HELIX/SHEET residue numbers and NUMMDL must be integers");
            }

            IoError::Pdb(_) => {
                self.add("The coordinate section could not be read");
                self.add("ATOM/HETATM coordinates must sit in columns 31-54");
                self.add("Check that the file is fixed-column PDB, not mmCIF");
            }

            IoError::ModelNotFound(model) => {
                self.add(format!("The file has no MODEL {}", model));
                self.add("Run `hbcensus models <FILE>` to see how many models it holds");
                self.add("Select an existing model with --model");
            }

            IoError::EmptyStructure => {
                self.add("Every atom was filtered out");
                self.add("Check that --chain names a chain present in the selected model");
                self.add("Verify the input contains ATOM or HETATM records");
            }

            IoError::Serialize(_) => {
                self.add("Summary table could not be encoded as JSON");
                self.add("Try --format text or --format csv");
            }

            IoError::Csv(_) => {
                self.add("CSV output could not be written");
                self.add("Check the -o/--audit destinations and available disk space");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("File contains invalid or corrupt data");
                self.add("PDB input must be valid UTF-8 text");
            }

            ErrorKind::UnexpectedEof => {
                self.add("Unexpected end of file encountered");
                self.add("The file may be truncated or incomplete");
            }

            ErrorKind::BrokenPipe => {
                self.add("Broken pipe: output consumer terminated");
                self.add("This may occur when piping to commands like `head`");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_survey_hints(&mut self, err: &Error) {
        use hbond_census::SurveyError;

        let Some(survey_err) = err.downcast_ref::<SurveyError>() else {
            return;
        };

        self.mark_typed();

        match survey_err {
            SurveyError::InvalidConfig(_) => {
                self.add("Distance cutoffs must be positive and finite");
                self.add("Angle cutoffs must lie within 0-180 degrees");
            }

            SurveyError::ConfigParse(_) => {
                self.add("Survey configuration has invalid TOML syntax");
                self.add("Thresholds belong under a [thresholds] table");
                self.add("hydrogen accepts \"first\" or \"nearest\"");
            }

            SurveyError::EmptyStructure => {
                self.add("The structure has no atoms to survey");
                self.add("Check the --model and --chain selection");
            }

            SurveyError::MissingAtom { .. } | SurveyError::DegenerateGeometry(_) => {
                self.add("A single pair could not be measured");
                self.add("Run with -vv to see which residues were skipped");
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("terminal") || msg.contains("stdin") {
            self.add("Input appears to be from a terminal");
            self.add("Pass PDB files as arguments or pipe data to stdin");
            return;
        }

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
            self.add("Ensure you have the required access rights");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = String::new();

    text.push_str(&err.to_string());

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}
