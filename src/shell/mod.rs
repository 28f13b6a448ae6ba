//! Shell Module
//!
//! The interactive command loop: reads one command line at a time from a
//! generic input stream, dispatches it against the store and the
//! persistence gateway, and renders outcomes as human text on the output
//! stream.
//!
//! Command handling never terminates the process; `exit` surfaces as
//! [`Flow::Exit`] and the outer driver decides what to do (save, then
//! stop).

pub mod command;
pub mod input;

pub use command::{tokenize, ShellCommand, Usage};

use std::io::{BufRead, Write};

use crate::config::Config;
use crate::error::Result;
use crate::geo;
use crate::persist;
use crate::record::{Attribute, Record, RecordKey, MAX_POPULATION, MIN_POPULATION};
use crate::store::{InsertOutcome, Store};

/// What the driver loop should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Interactive session over a store
pub struct Shell<'a, R: BufRead, W: Write> {
    store: &'a mut Store,
    config: &'a Config,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(store: &'a mut Store, config: &'a Config, input: R, output: W) -> Self {
        Self {
            store,
            config,
            input,
            output,
        }
    }

    /// Run the command loop until `exit` or end of input
    ///
    /// Command failures are rendered and the loop continues; only stream
    /// failures abort the session.
    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.output,
            "Welcome to the city gazetteer! Type 'help' to see available commands."
        )?;

        loop {
            write!(self.output, "\nEnter command: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            match self.execute(line.trim()) {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }

        Ok(())
    }

    /// Execute one command line
    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            writeln!(self.output, "No command entered!")?;
            return Ok(Flow::Continue);
        }

        let cmd = match ShellCommand::parse(&tokens) {
            Ok(cmd) => cmd,
            Err(usage) => {
                writeln!(self.output, "{usage}")?;
                return Ok(Flow::Continue);
            }
        };

        match cmd {
            ShellCommand::Add { name } => self.cmd_add(&name)?,
            ShellCommand::Delete { name, region } => {
                self.store.remove(&name, &region)?;
                writeln!(self.output, "City deleted successfully!")?;
            }
            ShellCommand::Modify {
                name,
                region,
                attribute,
            } => self.cmd_modify(&name, &region, &attribute)?,
            ShellCommand::Search {
                name,
                region,
                attribute,
            } => {
                let record = self.store.find(&name, &region)?;
                let attribute: Attribute = attribute.parse()?;
                writeln!(
                    self.output,
                    "{}: {}",
                    attribute.label(),
                    record.attribute(attribute)
                )?;
            }
            ShellCommand::DisplayAll => {
                if self.store.is_empty() {
                    writeln!(self.output, "No cities available.")?;
                } else {
                    for record in self.store.iter() {
                        writeln!(self.output, "{record}")?;
                    }
                }
            }
            ShellCommand::Display { name, region } => {
                let record = self.store.find(&name, &region)?;
                write_record_block(&mut self.output, record)?;
            }
            ShellCommand::Sort { attribute } => {
                let key = self.store.sort_by(&attribute);
                writeln!(self.output, "Cities sorted by {} successfully!", key.as_str())?;
            }
            ShellCommand::FilterPopulation { min, max } => {
                if self.store.is_empty() {
                    writeln!(self.output, "No cities available.")?;
                } else {
                    let mut found = false;
                    for record in self.store.filter_by_population(min, max) {
                        writeln!(self.output, "{record}")?;
                        found = true;
                    }
                    if !found {
                        writeln!(
                            self.output,
                            "No cities found within the specified population range."
                        )?;
                    }
                }
            }
            ShellCommand::FilterRegion { region } => {
                if self.store.is_empty() {
                    writeln!(self.output, "No cities available.")?;
                } else {
                    let mut found = false;
                    for record in self.store.filter_by_region(&region) {
                        writeln!(self.output, "{record}")?;
                        found = true;
                    }
                    if !found {
                        writeln!(self.output, "No cities found in the specified region.")?;
                    }
                }
            }
            ShellCommand::Stats => {
                let stats = self.store.statistics()?;
                writeln!(self.output, "----- Statistical Summary -----")?;
                writeln!(self.output, "Total Number of Cities: {}", stats.count)?;
                writeln!(self.output, "Average Population: {}", stats.average_population)?;
                writeln!(self.output, "Minimum Population: {}", stats.min_population)?;
                writeln!(self.output, "Maximum Population: {}", stats.max_population)?;
                writeln!(self.output, "Average Year Recorded: {}", stats.average_year)?;
                writeln!(self.output, "Average Latitude: {}", stats.average_latitude)?;
                writeln!(self.output, "Average Longitude: {}", stats.average_longitude)?;
                writeln!(self.output, "-------------------------------")?;
            }
            ShellCommand::Save => {
                persist::save_to_path(self.store, &self.config.data_file)?;
                writeln!(self.output, "Cities saved to file successfully!")?;
            }
            ShellCommand::Load => self.cmd_load()?,
            ShellCommand::Distance {
                name1,
                region1,
                name2,
                region2,
            } => {
                let a = self.store.find(&name1, &region1)?;
                let b = self.store.find(&name2, &region2)?;
                let km = geo::haversine_km(a.latitude(), a.longitude(), b.latitude(), b.longitude());
                writeln!(
                    self.output,
                    "Distance between {}, {} and {}, {} is: {km:.1} km.",
                    a.name(),
                    a.region(),
                    b.name(),
                    b.region()
                )?;
            }
            ShellCommand::Help => self.cmd_help()?,
            ShellCommand::Exit => {
                writeln!(self.output, "Terminating program and saving any changes...")?;
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }

    /// Collect a full record through the validated prompts, then insert
    fn cmd_add(&mut self, name: &str) -> Result<()> {
        let region = input::read_nonempty(&mut self.input, &mut self.output, "Enter region: ", "Region")?;
        let population = input::read_u32_in_range(
            &mut self.input,
            &mut self.output,
            "Enter population: ",
            MIN_POPULATION,
            MAX_POPULATION,
        )?;
        let year = input::read_year(
            &mut self.input,
            &mut self.output,
            "Enter year recorded (4-digit year): ",
        )?;
        let mayor_name = input::read_nonempty(
            &mut self.input,
            &mut self.output,
            "Enter mayor's name: ",
            "Mayor's name",
        )?;
        let mayor_address = input::read_nonempty(
            &mut self.input,
            &mut self.output,
            "Enter mayor's address: ",
            "Mayor's address",
        )?;
        let history = input::read_nonempty(
            &mut self.input,
            &mut self.output,
            "Enter a short history: ",
            "History",
        )?;
        let latitude = input::read_f64_in_range(
            &mut self.input,
            &mut self.output,
            "Enter latitude (between -90 and 90): ",
            -90.0,
            90.0,
        )?;
        let longitude = input::read_f64_in_range(
            &mut self.input,
            &mut self.output,
            "Enter longitude (between -180 and 180): ",
            -180.0,
            180.0,
        )?;

        let record = Record::new(
            name,
            &region,
            population,
            year,
            &mayor_name,
            &mayor_address,
            &history,
            latitude,
            longitude,
        )?;

        let store = &mut *self.store;
        let input = &mut self.input;
        let output = &mut self.output;
        let outcome = store.insert_or_confirm(record, &mut |key: &RecordKey| {
            prompt_replace(&mut *input, &mut *output, key)
        });

        match outcome {
            InsertOutcome::Inserted => writeln!(self.output, "City added successfully!")?,
            InsertOutcome::Replaced => writeln!(self.output, "City overwritten successfully!")?,
            InsertOutcome::Skipped => writeln!(self.output, "City not added.")?,
        }
        Ok(())
    }

    /// Prompt for the new value of one attribute, then update in place
    fn cmd_modify(&mut self, name: &str, region: &str, attribute: &str) -> Result<()> {
        // Lookup first so a missing city is reported even for a bad attribute
        self.store.find(name, region)?;
        let attribute: Attribute = attribute.parse()?;

        let raw = match attribute {
            Attribute::Name => {
                input::read_nonempty(&mut self.input, &mut self.output, "Enter the new name: ", "Name")?
            }
            Attribute::Region => input::read_nonempty(
                &mut self.input,
                &mut self.output,
                "Enter the new region: ",
                "Region",
            )?,
            Attribute::Population => input::read_u32_in_range(
                &mut self.input,
                &mut self.output,
                "Enter the new population: ",
                MIN_POPULATION,
                MAX_POPULATION,
            )?
            .to_string(),
            Attribute::Year => input::read_year(
                &mut self.input,
                &mut self.output,
                "Enter the new year (4-digit year): ",
            )?
            .to_string(),
            Attribute::MayorName => input::read_nonempty(
                &mut self.input,
                &mut self.output,
                "Enter the new mayor's name: ",
                "Mayor's name",
            )?,
            Attribute::MayorAddress => input::read_nonempty(
                &mut self.input,
                &mut self.output,
                "Enter the new mayor's address: ",
                "Mayor's address",
            )?,
            Attribute::History => input::read_nonempty(
                &mut self.input,
                &mut self.output,
                "Enter the new history: ",
                "History",
            )?,
            Attribute::Latitude => input::read_f64_in_range(
                &mut self.input,
                &mut self.output,
                "Enter the new latitude (between -90 and 90): ",
                -90.0,
                90.0,
            )?
            .to_string(),
            Attribute::Longitude => input::read_f64_in_range(
                &mut self.input,
                &mut self.output,
                "Enter the new longitude (between -180 and 180): ",
                -180.0,
                180.0,
            )?
            .to_string(),
        };

        self.store.update_attribute(name, region, attribute.as_str(), &raw)?;
        writeln!(self.output, "{} updated successfully!", attribute.label())?;
        Ok(())
    }

    /// Reload the data file, prompting on key conflicts
    fn cmd_load(&mut self) -> Result<()> {
        let data_file = self.config.data_file.clone();
        let strictness = self.config.strictness;

        let store = &mut *self.store;
        let input = &mut self.input;
        let output = &mut self.output;
        let report = persist::load_from_path(store, &data_file, strictness, &mut |key: &RecordKey| {
            prompt_replace(&mut *input, &mut *output, key)
        })?;

        writeln!(
            self.output,
            "Cities loaded from file successfully! ({} loaded, {} replaced, {} skipped)",
            report.inserted, report.replaced, report.skipped
        )?;
        Ok(())
    }

    fn cmd_help(&mut self) -> Result<()> {
        writeln!(self.output, "\n================== Help Menu ==================")?;
        writeln!(self.output, "Available Commands:")?;
        writeln!(self.output, "-----------------------------------------------")?;
        writeln!(self.output, "add <cityname>                   - Add a new city to the database.")?;
        writeln!(self.output, "delete <cityname> <region>       - Delete a city from the database.")?;
        writeln!(self.output, "modify <cityname> <region> <attribute> - Modify a specific attribute of a city.")?;
        writeln!(self.output, "search <cityname> <region> <attribute> - Search for a specific attribute of a city.")?;
        writeln!(self.output, "display                          - Display all cities in the database.")?;
        writeln!(self.output, "display <cityname> <region>      - Display a specific city.")?;
        writeln!(self.output, "sort <attribute>                 - Sort cities by: name, population, year, latitude, longitude.")?;
        writeln!(self.output, "filter population <min> <max>    - Display cities within a population range.")?;
        writeln!(self.output, "filter region <region>           - Display cities in a region.")?;
        writeln!(self.output, "stats                            - Display statistical summaries of the cities.")?;
        writeln!(self.output, "save                             - Save the current list of cities to the data file.")?;
        writeln!(self.output, "load                             - Load cities from the data file.")?;
        writeln!(self.output, "distance <city1> <region1> <city2> <region2> - Great-circle distance between two cities.")?;
        writeln!(self.output, "help                             - Display this help menu.")?;
        writeln!(self.output, "exit                             - Save changes and exit the program.")?;
        writeln!(self.output, "Multi-word names must be enclosed in double quotes (\").")?;
        writeln!(self.output, "=================================================")?;
        Ok(())
    }
}

/// Ask whether an existing city should be overwritten
///
/// Stream failures count as "no": an unanswerable prompt must never
/// replace a record.
fn prompt_replace<R: BufRead, W: Write>(input: &mut R, output: &mut W, key: &RecordKey) -> bool {
    let prompt = format!(
        "A city named {key} already exists.\nDo you want to overwrite it? (yes/no): "
    );
    match input::read_line(input, output, &prompt) {
        Ok(answer) => answer.to_lowercase() == "yes",
        Err(_) => false,
    }
}

/// Render the full city information block
fn write_record_block<W: Write>(output: &mut W, record: &Record) -> Result<()> {
    writeln!(output, "----- City Information -----")?;
    writeln!(output, "Name: {}", record.name())?;
    writeln!(output, "Region: {}", record.region())?;
    writeln!(output, "Population: {}", record.population())?;
    writeln!(output, "Year: {}", record.year_recorded())?;
    writeln!(output, "Mayor's Name: {}", record.mayor_name())?;
    writeln!(output, "Mayor's Address: {}", record.mayor_address())?;
    writeln!(output, "History: {}", record.history())?;
    writeln!(output, "Latitude: {}", record.latitude())?;
    writeln!(output, "Longitude: {}", record.longitude())?;
    writeln!(output, "-----------------------------")?;
    Ok(())
}
