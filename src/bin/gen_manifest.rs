use anyhow::Result;

const HEADER: &str = "MFSTKEY,STATUS,LASTUPDATE,MFSTNUMBER,POWERUNIT,STOP,MFSTDATE,PRONUMBER,PRODATE,SHIPNAME,CONSNAME,CONSADD1,CONSADD2,CONSCITY,CONSSTATE,CONSZIP,TTLPCS,TTLYDS,TTLWGT,DLVDDATE,DLVDTIME,DLVDPCS,DLVDSIGN,DLVDNOTE,DLVDIMGFILELOCN,DLVDIMGFILESIGN";

const ROWS: &[&str] = &[
    "045X021624001,0,20240201123000,045X021624,045,1,02162024,41750686,02152024,DOOLITTLE CARPET & PAINT,MOHAWK WHSE/MENDOTA HEIGHTS,2359 WATERS DRIVE,,MENDOTA HEIGHTS,MN,55120,,,,,,,,,,",
    "045X021624002,0,20240201123000,045X021624,045,2,02162024,41750687,02152024,DOOLITTLE CARPET & PAINT,ACME FLOORING,114 MAIN ST,,SAINT PAUL,MN,55101,12,40,960,,,,,,,",
    "045X021624003,0,20240201123000,045X021624,045,3,02162024,41750688,02152024,NULL,O'BRIEN SUPPLY,88 RIVER RD,,MINNEAPOLIS,MN,55401,4,,120,,,,,,,",
];

fn main() -> Result<()> {
    let path = std::path::Path::new("dev");
    std::fs::create_dir_all(path)?;
    let csv_path = path.join("dmfstdat.csv");

    let mut content = String::new();
    content.push_str(HEADER);
    content.push('\n');
    content.push_str(&",".repeat(25));
    content.push('\n');
    for row in ROWS {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&csv_path, content)?;

    println!("Wrote sample manifest at {}", csv_path.display());
    Ok(())
}
