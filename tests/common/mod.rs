use std::fs::File;
use std::io::Error;
use std::path::Path;

pub fn write_cart_csv(path: &Path, rows: &[(&str, &str, &str)]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["photo", "photographer", "price"])?;
    for (photo, photographer, price) in rows {
        wtr.write_record([*photo, *photographer, *price])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_directory_csv(path: &Path, ids: &[&str]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["id", "name", "bank", "tax_id", "phone", "account_holder"])?;
    for id in ids {
        let name = format!("{id} studio");
        let holder = format!("{id} holder");
        wtr.write_record([
            *id,
            name.as_str(),
            "Banco Nacional",
            "J-12345678-9",
            "+58 412 5551234",
            holder.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_payments_csv(path: &Path, rows: &[(&str, &str, &str)]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["photographer", "reference", "proof"])?;
    for (photographer, reference, proof) in rows {
        wtr.write_record([*photographer, *reference, *proof])?;
    }
    wtr.flush()?;
    Ok(())
}
