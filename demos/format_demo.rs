use xmledit::format;

fn main() {
    let cases = [
        ("Fractional", 0.75),
        ("Small float", 0.0080526),
        ("Large int", 1234567.0),
        ("Zero", 0.0),
        ("Small int", 7.0),
        ("Small float", 0.000123),
        ("Large float", 987654321.123),
        ("Negative int", -42.0),
        ("Negative float", -0.000987),
        ("Pi", 3.1415926535),
        ("Tiny float", 1e-9),
        ("Huge float", 1.23e15),
        ("Recurring decimal", 1.0 / 3.0),
    ];

    println!(
        "{:<20} {:<20} {:<20} {:<20} {:<20}",
        "Description", "Value", "natural (3)", "natural (5)", "natural_si (3)"
    );
    println!("{}", "-".repeat(100));
    for (description, value) in cases {
        println!(
            "{:<20} {:<20} {:<20} {:<20} {:<20}",
            description,
            value,
            format::natural(value, 3),
            format::natural(value, 5),
            format::natural_si(value, 3)
        );
    }
}
