use roman_numerals::parse;

fn main() {
    let result = parse("MCMXCIX");
    println!("{result:?}");

    if let Ok(year) = parse("MCMXCIX") {
        println!("{} = {}", year, year.value());
        println!("{:?}", year.add(1));
    }
}
