use crate::config::Config;

/// How a result is shown on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub prompt: bool,
    pub decimal: bool,
    pub hex: bool,
    pub scientific: bool,
    pub precision: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions::from(&Config::default())
    }
}

impl<'a> From<&'a Config> for OutputOptions {
    fn from(config: &'a Config) -> Self {
        OutputOptions {
            prompt: config.output_prompt,
            decimal: config.output_format.decimal,
            hex: config.output_format.hex,
            scientific: config.output_format.scientific,
            precision: config.precision,
        }
    }
}

fn line(prompt: bool, label: &str, value: String) -> String {
    if prompt {
        format!("{}: {}", label, value)
    } else {
        value
    }
}

/// Formats `result` into one line per enabled format. Decimal is used when
/// nothing is enabled.
pub fn render(result: f64, options: &OutputOptions) -> Vec<String> {
    let OutputOptions {
        prompt, precision, ..
    } = *options;
    let mut lines = vec![];

    if options.decimal || !(options.hex || options.scientific) {
        lines.push(line(prompt, "Result", format!("{:.*}", precision, result)));
    }

    if options.hex {
        // Truncated to an integer; negative values show in two's complement.
        let value = format!("0x{:X}", result as i64);
        lines.push(line(prompt, "Hexadecimal", value));
    }

    if options.scientific {
        lines.push(line(prompt, "Scientific", format!("{:.*e}", precision, result)));
    }

    lines
}
