use rs_markov_core::model::markov_model::MarkovModel;
use rs_markov_core::scan::{scan_lines, scan_words};

// Small training corpus; replace with any text of your own
const CORPUS: &str = "\
Show your flowcharts and conceal your tables and I will be mystified. \
Show your tables and your flowcharts will be obvious. \
A program that produces incorrect results twice as fast is infinitely slower. \
A language that doesn't affect the way you think about programming \
is not worth knowing. \
The best way to predict the future is to invent it. \
Simplicity does not precede complexity but follows it.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build the model from the corpus
    // The prefix length controls how faithful the output is to the input:
    // longer prefixes reproduce the corpus more literally
    let model = MarkovModel::build(CORPUS.as_bytes(), 2, scan_words)?;

    println!(
        "Model built: {} prefixes of length {}",
        model.len(),
        model.prefix_len()
    );

    // Generate 10 chains of at most 16 words, space delimited
    for i in 0..10 {
        println!("Generated chain {}: {}", i + 1, model.generate(16)?);
    }

    // Any splitting strategy works; line splitting treats whole lines as tokens
    let lines = "alpha\nbeta\ngamma\nalpha\nbeta\ndelta";
    let line_model = MarkovModel::build(lines.as_bytes(), 1, scan_lines)?;
    println!("Line chain: {}", line_model.generate_delimited(4, " / ")?);

    Ok(())
}
