mod scan_bad;
mod scan_good;
