//! Command tokenizing and parsing
//!
//! Splits a raw command line into tokens (double quotes group a multi-word
//! token) and resolves the leading token into a typed shell command.

use std::fmt;

/// Usage text returned when a command line does not parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usage(pub String);

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const QUOTE_NOTE: &str =
    "Note: If the city name consists of multiple words, enclose it in double quotes (\").";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Add {
        name: String,
    },
    Delete {
        name: String,
        region: String,
    },
    Modify {
        name: String,
        region: String,
        attribute: String,
    },
    Search {
        name: String,
        region: String,
        attribute: String,
    },
    DisplayAll,
    Display {
        name: String,
        region: String,
    },
    Sort {
        attribute: String,
    },
    FilterPopulation {
        min: u32,
        max: u32,
    },
    FilterRegion {
        region: String,
    },
    Stats,
    Save,
    Load,
    Distance {
        name1: String,
        region1: String,
        name2: String,
        region2: String,
    },
    Help,
    Exit,
}

/// Split a command line into tokens
///
/// Whitespace separates tokens; a token opening with `"` runs to the next
/// `"` and may contain whitespace. An unterminated quote runs to the end
/// of the line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut token = String::new();
        if c == '"' {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '"' {
                    break;
                }
                token.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
        }
        tokens.push(token);
    }

    tokens
}

impl ShellCommand {
    /// Resolve a token list into a command, or usage text on arity errors
    pub fn parse(tokens: &[String]) -> Result<ShellCommand, Usage> {
        let Some(first) = tokens.first() else {
            return Err(Usage("No command entered!".to_string()));
        };
        let cmd = first.to_lowercase();

        match cmd.as_str() {
            "add" => {
                if tokens.len() < 2 {
                    return Err(Usage(format!("Usage: add <cityname>\n{QUOTE_NOTE}")));
                }
                Ok(ShellCommand::Add {
                    name: tokens[1].clone(),
                })
            }
            "delete" => {
                if tokens.len() < 3 {
                    return Err(Usage(format!("Usage: delete <cityname> <region>\n{QUOTE_NOTE}")));
                }
                Ok(ShellCommand::Delete {
                    name: tokens[1].clone(),
                    region: tokens[2].clone(),
                })
            }
            "modify" => {
                if tokens.len() < 4 {
                    return Err(Usage(format!(
                        "Usage: modify <cityname> <region> <attribute>\n{QUOTE_NOTE}"
                    )));
                }
                Ok(ShellCommand::Modify {
                    name: tokens[1].clone(),
                    region: tokens[2].clone(),
                    attribute: tokens[3].to_lowercase(),
                })
            }
            "search" => {
                if tokens.len() < 4 {
                    return Err(Usage(format!(
                        "Usage: search <cityname> <region> <attribute>\n{QUOTE_NOTE}"
                    )));
                }
                Ok(ShellCommand::Search {
                    name: tokens[1].clone(),
                    region: tokens[2].clone(),
                    attribute: tokens[3].to_lowercase(),
                })
            }
            "display" => match tokens.len() {
                1 => Ok(ShellCommand::DisplayAll),
                3 => Ok(ShellCommand::Display {
                    name: tokens[1].clone(),
                    region: tokens[2].clone(),
                }),
                _ => Err(Usage(format!(
                    "Usage:\n  display                      - Display all cities.\n  display <cityname> <region>  - Display a specific city.\n{QUOTE_NOTE}"
                ))),
            },
            "sort" => {
                if tokens.len() < 2 {
                    return Err(Usage(
                        "Usage: sort <attribute>\nAvailable attributes: name, population, year, latitude, longitude"
                            .to_string(),
                    ));
                }
                Ok(ShellCommand::Sort {
                    attribute: tokens[1].to_lowercase(),
                })
            }
            "filter" => parse_filter(tokens),
            "stats" => Ok(ShellCommand::Stats),
            "save" => Ok(ShellCommand::Save),
            "load" => Ok(ShellCommand::Load),
            "distance" => {
                if tokens.len() < 5 {
                    return Err(Usage(format!(
                        "Usage: distance <city1name> <region1> <city2name> <region2>\n{QUOTE_NOTE}"
                    )));
                }
                Ok(ShellCommand::Distance {
                    name1: tokens[1].clone(),
                    region1: tokens[2].clone(),
                    name2: tokens[3].clone(),
                    region2: tokens[4].clone(),
                })
            }
            "help" => Ok(ShellCommand::Help),
            "exit" => Ok(ShellCommand::Exit),
            _ => Err(Usage(
                "Unknown command! Type 'help' to see available commands.".to_string(),
            )),
        }
    }
}

fn parse_filter(tokens: &[String]) -> Result<ShellCommand, Usage> {
    if tokens.len() < 2 {
        return Err(Usage(
            "Usage: filter <attribute> [parameters]\nAvailable attributes: population, region"
                .to_string(),
        ));
    }

    match tokens[1].to_lowercase().as_str() {
        "population" => {
            if tokens.len() < 4 {
                return Err(Usage("Usage: filter population <min> <max>".to_string()));
            }
            let (min, max) = match (tokens[2].parse::<u32>(), tokens[3].parse::<u32>()) {
                (Ok(min), Ok(max)) => (min, max),
                _ => {
                    return Err(Usage(
                        "Invalid population range. Please enter valid integers.".to_string(),
                    ))
                }
            };
            if min > max {
                return Err(Usage(
                    "Minimum population cannot be greater than maximum population.".to_string(),
                ));
            }
            Ok(ShellCommand::FilterPopulation { min, max })
        }
        "region" => {
            if tokens.len() < 3 {
                return Err(Usage("Usage: filter region <region>".to_string()));
            }
            Ok(ShellCommand::FilterRegion {
                region: tokens[2].clone(),
            })
        }
        _ => Err(Usage(
            "Invalid filter attribute. Available attributes: population, region".to_string(),
        )),
    }
}
