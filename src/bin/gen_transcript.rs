//! Synthetic transcript generator for stress testing chatstats.
//!
//! Usage: cargo run --features gen-test --bin gen_transcript -- [messages] [output] [layout]
//! Example: cargo run --features gen-test --bin gen_transcript -- 100000 heavy_chat.txt android

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use rand::Rng;
use rand::seq::SliceRandom;

const EMOJIS: &[&str] = &[
    "😀", "😂", "🤣", "😍", "🥰", "🤔", "🙄", "😱", "🤯", "💀", "👻", "🤖", "🦄", "🌈", "⚡",
    "🔥", "👍", "❤", "💔", "🇰🇿", "🎉", "🚀",
];

const AUTHORS: &[&str] = &[
    "Alice",
    "Bob",
    "Иван",
    "Мария",
    "村上",
    "محمد",
    "User;With;Semicolons",
    "🔥FireUser🔥",
    "+7 701 555 0101",
];

const LINKS: &[&str] = &[
    "https://example.com",
    "https://example.com/a/b?c=d",
    "http://x.co",
    "https://youtu.be/dQw4w9WgXcQ",
];

const NOTICES: &[&str] = &[
    "Alice added Bob",
    "Мария left",
    "Bob changed the subject from \"plans\" to \"plans: june\"",
    "Иван joined using this group's invite link",
    "Security code changed. Tap to learn more.",
];

#[derive(Clone, Copy)]
enum Layout {
    Android,
    IosBracketed,
    EuDot,
}

impl Layout {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "android" => Some(Layout::Android),
            "ios" | "ios-bracketed" => Some(Layout::IosBracketed),
            "eu-dot" => Some(Layout::EuDot),
            _ => None,
        }
    }

    /// Header prefix up to and including the separator.
    fn header(self, i: usize) -> String {
        let day = (i / 500) % 28 + 1;
        let month = (i / 14_000) % 12 + 1;
        let minute = i % 60;
        let hour24 = (i / 60) % 24;
        let hour12 = match hour24 % 12 {
            0 => 12,
            h => h,
        };
        let meridiem = if hour24 < 12 { "AM" } else { "PM" };

        match self {
            Layout::Android => format!("{day:02}/{month:02}/24, {hour12}:{minute:02} {meridiem} - "),
            Layout::IosBracketed => {
                format!("[{month}/{day}/24, {hour12}:{minute:02}:00 {meridiem}] ")
            }
            Layout::EuDot => format!("{day:02}.{month:02}.2024, {hour24:02}:{minute:02} - "),
        }
    }
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map_or("heavy_chat.txt", String::as_str);
    let layout_name = args.get(3).map_or("android", String::as_str);

    let Some(layout) = Layout::parse(layout_name) else {
        eprintln!("Unknown layout: {layout_name}. Use 'android', 'ios-bracketed' or 'eu-dot'");
        std::process::exit(1);
    };

    println!("🧪 Transcript Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {count}");
    println!("   Output:   {output}");
    println!("   Layout:   {layout_name}");
    println!();

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let mut rng = rand::thread_rng();
    let start = Instant::now();
    let mut bytes_written = 0usize;

    let opening = format!("{}Alice created group \"Stress Test\"\n", layout.header(0));
    writer.write_all(opening.as_bytes())?;
    bytes_written += opening.len();

    for i in 1..count {
        let line = generate_message(&mut rng, layout, i);
        writer.write_all(line.as_bytes())?;
        bytes_written += line.len();

        if (i + 1) % 10_000 == 0 {
            let mps = (i + 1) as f64 / start.elapsed().as_secs_f64();
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                bytes_written as f64 / 1_000_000.0,
                mps
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", bytes_written as f64 / 1_000_000.0);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

/// One message, terminator included. Some messages span several lines.
fn generate_message(rng: &mut impl Rng, layout: Layout, index: usize) -> String {
    let header = layout.header(index);
    let author = AUTHORS.choose(rng).copied().unwrap_or("Alice");

    let body = match index % 20 {
        0..=7 => format!("Normal message #{index} with some text"),
        8 => format!("{} {}", "look at this", LINKS.choose(rng).copied().unwrap_or("")),
        9 => {
            let emojis: String = (0..rng.gen_range(1..20))
                .filter_map(|_| EMOJIS.choose(rng).copied())
                .collect();
            format!("Emoji spam: {emojis} #{index}")
        }
        10 => "<Media omitted>".to_string(),
        11 => format!("Multi-line #{index}\nsecond line\n\nfourth line after a blank"),
        12 => format!("Кириллица: Привет мир! #{index}"),
        13 => format!("日本語: こんにちは #{index}"),
        14 => format!("Time inside body: 10:30 - not a header #{index}"),
        15 => format!("Mixed: Hello Привет 你好 🌍 {} #{index}", LINKS[index % LINKS.len()]),
        16 => {
            let notice = NOTICES.choose(rng).copied().unwrap_or("Alice left");
            return format!("{header}{notice}\n");
        }
        17 => "x".repeat(rng.gen_range(1_000..10_000)),
        18 => format!("Semicolons; \"quotes\"; and\ttabs #{index}"),
        _ => format!("Fallback message #{index}"),
    };

    format!("{header}{author}: {body}\n")
}
