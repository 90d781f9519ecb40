//! Interactive fraction calculator CLI.
//!
//! Two functions behind a top menu: evaluate one binary fraction expression
//! (`1/2+1/3`), or sort a comma-separated fraction list whose final
//! character picks the order (`<` ascending, `>` descending). `#` returns
//! from either prompt to the top menu; end of input exits.
//!
//! Prompts are in Chinese; the terminal must support UTF-8.

use std::io::{self, BufRead, Write};
use std::process;
use teller::fraction::{expr, list};

fn main() {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(e) = run(stdin.lock(), stdout.lock()) {
        eprintln!("发生错误: {}", e);
        process::exit(1);
    }
}

fn run<R: BufRead, W: Write>(mut reader: R, mut writer: W) -> io::Result<()> {
    loop {
        writeln!(writer, "请选择功能：(键入1或者2)")?;
        writeln!(writer, "1.分数计算")?;
        writeln!(writer, "2.分数排序")?;
        writeln!(writer, "——")?;
        writer.flush()?;

        let choice = match read_line(&mut reader)? {
            Some(choice) => choice,
            None => return Ok(()),
        };

        match choice.trim() {
            "1" => {
                if !expression_loop(&mut reader, &mut writer)? {
                    return Ok(());
                }
            }
            "2" => {
                if !sort_loop(&mut reader, &mut writer)? {
                    return Ok(());
                }
            }
            _ => writeln!(writer, "输入错误，请重新选择！")?,
        }
    }
}

/// Expression prompt. Returns `false` when input ended.
fn expression_loop<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<bool> {
    loop {
        writeln!(writer, "请输入分数计算式(如:1/2+1/3),输入#返回上一层目录:")?;
        writer.flush()?;

        let line = match read_line(reader)? {
            Some(line) => line,
            None => return Ok(false),
        };
        if line.trim() == "#" {
            return Ok(true);
        }
        match expr::evaluate(&line) {
            Ok(result) => writeln!(writer, "{}", result)?,
            Err(_) => writeln!(writer, "输入错误!")?,
        }
    }
}

/// Sort prompt. Returns `false` when input ended.
fn sort_loop<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<bool> {
    loop {
        writeln!(
            writer,
            "输入一组分数,用英文逗号隔开,如需由小到大排序用<结尾，由大到小排序用>结尾(如1/2,1/4,3/5<),输入#返回上层目录："
        )?;
        writer.flush()?;

        let line = match read_line(reader)? {
            Some(line) => line,
            None => return Ok(false),
        };
        if line.trim() == "#" {
            return Ok(true);
        }
        match list::evaluate(&line) {
            Ok(sorted) => writeln!(writer, "{}", sorted)?,
            Err(_) => writeln!(writer, "输入错误!")?,
        }
    }
}

/// One line of input, or `None` at end of input.
fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
