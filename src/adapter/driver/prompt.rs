// コンソール入力プリミティブ
// 不正な入力はすべてこの層で再入力を促して回復し、上位へは漏らさない

use std::io::{self, Write};

use crate::domain::model::Money;

/// プロンプトを表示して1行読み込む
pub fn read_line(prompt: &str) -> io::Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

/// Enterが押されるまで待つ
pub fn wait_for_enter() -> io::Result<()> {
    read_line("\nPress Enter to return...")?;
    Ok(())
}

/// メニュー選択肢の入力文字列を解釈する
/// 数字のみ・範囲内の場合のみSomeを返す
fn parse_menu_choice(input: &str, min: u32, max: u32) -> Option<u32> {
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    input
        .parse::<u32>()
        .ok()
        .filter(|choice| (min..=max).contains(choice))
}

/// 範囲内の数値が入力されるまで繰り返しプロンプトを表示する
pub fn menu_choice(prompt: &str, min: u32, max: u32) -> io::Result<u32> {
    loop {
        let input = read_line(prompt)?;

        // Enterのみの入力はスキップ
        if input.is_empty() {
            continue;
        }

        if !input.chars().all(|c| c.is_ascii_digit()) {
            println!(
                "Invalid input! Please enter a number between {} and {}.",
                min, max
            );
            continue;
        }

        match parse_menu_choice(&input, min, max) {
            Some(choice) => return Ok(choice),
            None => println!("Please enter a number between {} and {}.", min, max),
        }
    }
}

/// 非負整数が入力されるまで繰り返しプロンプトを表示する
pub fn read_u32(prompt: &str) -> io::Result<u32> {
    loop {
        let input = read_line(prompt)?;
        match input.trim().parse::<u32>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("Invalid input. Please enter a number."),
        }
    }
}

/// 金額が入力されるまで繰り返しプロンプトを表示する
pub fn read_money(prompt: &str) -> io::Result<Money> {
    loop {
        let input = read_line(prompt)?;
        match Money::parse(&input) {
            Ok(amount) => return Ok(amount),
            Err(_) => println!("Invalid input. Please enter an amount like 49.99."),
        }
    }
}

/// Y/Nの確認入力を求める
pub fn confirm(prompt: &str) -> io::Result<bool> {
    loop {
        let input = read_line(prompt)?;
        match input.trim() {
            "Y" | "y" => return Ok(true),
            "N" | "n" => return Ok(false),
            _ => continue,
        }
    }
}

/// エコーなしでパスワードを読み込む
pub fn read_password(prompt: &str) -> io::Result<String> {
    rpassword::prompt_password(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_menu_choice_accepts_in_range_digits() {
        assert_eq!(parse_menu_choice("3", 1, 5), Some(3));
        assert_eq!(parse_menu_choice("1", 1, 5), Some(1));
        assert_eq!(parse_menu_choice("5", 1, 5), Some(5));
    }

    #[test]
    fn test_parse_menu_choice_rejects_out_of_range() {
        assert_eq!(parse_menu_choice("0", 1, 5), None);
        assert_eq!(parse_menu_choice("6", 1, 5), None);
    }

    #[test]
    fn test_parse_menu_choice_rejects_non_numeric() {
        assert_eq!(parse_menu_choice("", 1, 5), None);
        assert_eq!(parse_menu_choice("abc", 1, 5), None);
        assert_eq!(parse_menu_choice("-1", 1, 5), None);
        assert_eq!(parse_menu_choice("2x", 1, 5), None);
    }

    #[test]
    fn test_parse_menu_choice_rejects_overflow() {
        assert_eq!(parse_menu_choice("99999999999999999999", 1, 5), None);
    }
}
