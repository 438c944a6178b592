use color_print::cformat;

use crate::encoder::Encoded;

const RULE: &str = "------+------+----------+--------------------------------";

/// Assembly listing: program counter, emitted bytes, source line.
pub fn print_dump(code: &[Encoded]) {
    println!("{}", RULE);
    for encoded in code {
        let bytes = encoded
            .bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            " {:>4} | {} | {:<8} | {}",
            encoded.inst.line.no(),
            cformat!("<green>{:04X}</>", encoded.inst.pc),
            bytes,
            encoded.inst.line.raw().trim_end(),
        );
    }
    println!("{}", RULE);
}
