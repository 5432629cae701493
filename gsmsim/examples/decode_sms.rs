// Decode EF_SMS records given as hex on the command line

// Each argument is one record as read from the card, e.g. the output of a
// READ RECORD on 6F3C. Free slots are reported and skipped.

use gsmsim::prelude::*;
use gsmsim::sms::decode_sms_hex;

fn main() -> Result<()> {
    env_logger::init();

    let records: Vec<String> = std::env::args().skip(1).collect();
    if records.is_empty() {
        println!("usage: decode_sms <record hex> [<record hex> ...]");
        return Ok(());
    }

    for (i, hex) in records.iter().enumerate() {
        match decode_sms_hex(hex)? {
            None => println!("#{}: free", i + 1),
            Some(sms) => {
                println!("#{}: {:?} from {} via {}", i + 1, sms.status_kind(), sms.sender, sms.smsc);
                println!("    sent {}", sms.timestamp);
                println!("    {}", sms.message);
            }
        }
    }
    Ok(())
}
