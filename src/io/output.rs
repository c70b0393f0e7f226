use std::io::Write;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::compare::{AttributeValue, ComparisonMatrix, MatrixCell, ValueFormat};
use crate::core::VehicleRecord;
use crate::formatting::{formatter_for, FormattingConfig, OutputFormatter, PlainFormatter};
use crate::sort::SortSpec;

pub trait CatalogWriter {
    fn write_list(&mut self, records: &[&VehicleRecord], sort: SortSpec) -> anyhow::Result<()>;
    fn write_matrix(&mut self, matrix: &ComparisonMatrix) -> anyhow::Result<()>;
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    formatting: FormattingConfig,
) -> Box<dyn CatalogWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListDocument<'a> {
    sort: String,
    count: usize,
    vehicles: &'a [&'a VehicleRecord],
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> CatalogWriter for JsonWriter<W> {
    fn write_list(&mut self, records: &[&VehicleRecord], sort: SortSpec) -> anyhow::Result<()> {
        let document = ListDocument {
            sort: sort.display_name(),
            count: records.len(),
            vehicles: records,
        };
        self.write_json(&document)
    }

    fn write_matrix(&mut self, matrix: &ComparisonMatrix) -> anyhow::Result<()> {
        self.write_json(matrix)
    }
}

/// Table output for people. Best cells are highlighted when color is on
/// and suffixed with `*` otherwise.
pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
    color: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            formatter: formatter_for(formatting),
            color: formatting.color.should_use_color(),
        }
    }

    fn new_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if self.color {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table
    }

    fn header_cell(&self, text: &str) -> Cell {
        let cell = Cell::new(text);
        if self.color {
            cell.add_attribute(Attribute::Bold)
        } else {
            cell
        }
    }

    fn matrix_cell(&self, cell: &MatrixCell) -> Cell {
        match (cell.is_best, self.color) {
            (true, true) => Cell::new(&cell.display)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
            (true, false) => Cell::new(PlainFormatter.best(&cell.display)),
            (false, _) => Cell::new(&cell.display),
        }
    }
}

fn number(format: ValueFormat, value: Option<f64>) -> String {
    format.render(value.map(AttributeValue::Number).as_ref())
}

fn list_row(rank: usize, record: &VehicleRecord) -> Vec<Cell> {
    vec![
        Cell::new(rank).set_alignment(CellAlignment::Right),
        Cell::new(record.id).set_alignment(CellAlignment::Right),
        Cell::new(record.display_name()),
        Cell::new(number(ValueFormat::Currency, Some(record.current_price))),
        Cell::new(number(ValueFormat::Unit("mi"), record.epa_range)),
        Cell::new(number(ValueFormat::Decimal(1, "kWh"), record.battery_capacity)),
        Cell::new(number(
            ValueFormat::Decimal(1, "s"),
            record.acceleration_zero_to_sixty,
        )),
        Cell::new(number(ValueFormat::Decimal(1, "/ 5"), record.average_rating)),
    ]
}

const LIST_HEADERS: [&str; 8] = [
    "#", "ID", "Vehicle", "Price", "Range", "Battery", "0-60", "Rating",
];

impl<W: Write> CatalogWriter for TerminalWriter<W> {
    fn write_list(&mut self, records: &[&VehicleRecord], sort: SortSpec) -> anyhow::Result<()> {
        let title = format!("{} vehicles, sorted by {}", records.len(), sort.display_name());
        writeln!(self.writer, "{}", self.formatter.header(&title))?;

        if records.is_empty() {
            writeln!(self.writer, "{}", self.formatter.dim("No vehicles match."))?;
            return Ok(());
        }

        let mut table = self.new_table();
        table.set_header(LIST_HEADERS.iter().map(|h| self.header_cell(h)).collect::<Vec<_>>());
        for (index, record) in records.iter().enumerate() {
            table.add_row(list_row(index + 1, record));
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_matrix(&mut self, matrix: &ComparisonMatrix) -> anyhow::Result<()> {
        let title = format!("Comparing {} vehicles", matrix.columns.len());
        writeln!(self.writer, "{}", self.formatter.header(&title))?;

        let mut table = self.new_table();
        let mut header = vec![self.header_cell("")];
        header.extend(matrix.columns.iter().map(|c| self.header_cell(&c.name)));
        table.set_header(header);

        for row in &matrix.rows {
            let mut cells = vec![self.header_cell(row.descriptor.label)];
            cells.extend(row.cells.iter().map(|cell| self.matrix_cell(cell)));
            table.add_row(cells);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}
