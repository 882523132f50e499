//! Synthetic ISO9660 images

#![allow(dead_code)]

use crate::common::MemoryBlockDevice;

pub const SECTOR: usize = 2048;

const FLAG_DIRECTORY: u8 = 0x02;

enum EntryKind {
    Dir(usize),
    File { content: Vec<u8>, flags: u8 },
}

struct Entry {
    name: String,
    kind: EntryKind,
}

struct Dir {
    parent: usize,
    entries: Vec<Entry>,
}

pub struct IsoBuilder {
    dirs: Vec<Dir>,
    volume_id: String,
    boot_catalog: Option<u32>,
    terminator: bool,
}

impl IsoBuilder {
    pub fn new() -> Self {
        Self {
            dirs: vec![Dir { parent: 0, entries: Vec::new() }],
            volume_id: "TEST VOLUME".to_string(),
            boot_catalog: None,
            terminator: true,
        }
    }

    /// Add a file; intermediate directories are created with the spelling given
    pub fn add_file(&mut self, path: &str, content: &[u8]) {
        self.add_file_with_flags(path, content, 0);
    }

    pub fn add_file_with_flags(&mut self, path: &str, content: &[u8], flags: u8) {
        let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
        let (name, parents) = components.split_last().expect("file path has a name");
        let dir = self.dir_index(parents);
        self.dirs[dir].entries.push(Entry {
            name: name.to_string(),
            kind: EntryKind::File { content: content.to_vec(), flags },
        });
    }

    pub fn add_dir(&mut self, path: &str) {
        let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
        self.dir_index(&components);
    }

    pub fn volume_id(&mut self, id: &str) {
        self.volume_id = id.to_string();
    }

    pub fn boot_catalog(&mut self, lba: u32) {
        self.boot_catalog = Some(lba);
    }

    /// Drop the terminator; the image then ends after the last descriptor
    pub fn without_terminator(&mut self) {
        self.terminator = false;
    }

    fn dir_index(&mut self, components: &[&str]) -> usize {
        let mut current = 0;
        for component in components {
            let existing = self.dirs[current].entries.iter().find_map(|e| match e.kind {
                EntryKind::Dir(idx) if e.name == *component => Some(idx),
                _ => None,
            });
            current = match existing {
                Some(idx) => idx,
                None => {
                    let idx = self.dirs.len();
                    self.dirs.push(Dir { parent: current, entries: Vec::new() });
                    self.dirs[current].entries.push(Entry {
                        name: component.to_string(),
                        kind: EntryKind::Dir(idx),
                    });
                    idx
                }
            };
        }
        current
    }

    pub fn build(&self) -> MemoryBlockDevice {
        MemoryBlockDevice::new(self.build_bytes())
    }

    pub fn build_bytes(&self) -> Vec<u8> {
        // Descriptors: 16 = PVD, then optional boot record, then terminator
        let mut next = 17u32;
        let boot_lba = self.boot_catalog.map(|_| {
            next += 1;
            next - 1
        });
        let terminator_lba = if self.terminator {
            next += 1;
            Some(next - 1)
        } else {
            None
        };
        let descriptors_end = next;

        // Directory extents
        let dir_sizes: Vec<u32> = self
            .dirs
            .iter()
            .map(|dir| {
                let records: usize = 68 + dir.entries.iter().map(|e| record_len(&e.name)).sum::<usize>();
                (records.div_ceil(SECTOR) * SECTOR) as u32
            })
            .collect();
        let mut dir_lbas = Vec::new();
        for size in &dir_sizes {
            dir_lbas.push(next);
            next += size / SECTOR as u32;
        }

        // File extents; empty files point at sector 0 like mkisofs does
        let mut file_lbas = Vec::new();
        for dir in &self.dirs {
            let mut lbas = Vec::new();
            for entry in &dir.entries {
                if let EntryKind::File { content, .. } = &entry.kind {
                    if content.is_empty() {
                        lbas.push(0);
                    } else {
                        lbas.push(next);
                        next += content.len().div_ceil(SECTOR) as u32;
                    }
                }
            }
            file_lbas.push(lbas);
        }

        let mut data = vec![0u8; next as usize * SECTOR];

        // Primary Volume Descriptor
        let pvd = 16 * SECTOR;
        write_header(&mut data, pvd, 1);
        write_padded(&mut data[pvd + 8..pvd + 40], "LINUX");
        write_padded(&mut data[pvd + 40..pvd + 72], &self.volume_id);
        write_both_endian_u32(&mut data[pvd + 80..], next);
        write_both_endian_u16(&mut data[pvd + 120..], 1);
        write_both_endian_u16(&mut data[pvd + 124..], 1);
        write_both_endian_u16(&mut data[pvd + 128..], 2048);
        write_both_endian_u32(&mut data[pvd + 132..], 10);
        write_record(&mut data, pvd + 156, dir_lbas[0], dir_sizes[0], FLAG_DIRECTORY, &[0x00]);
        data[pvd + 813..pvd + 829].copy_from_slice(b"2024042513370000");
        data[pvd + 881] = 1;

        if let (Some(lba), Some(catalog)) = (boot_lba, self.boot_catalog) {
            let offset = lba as usize * SECTOR;
            write_header(&mut data, offset, 0);
            data[offset + 7..offset + 30].copy_from_slice(b"EL TORITO SPECIFICATION");
            data[offset + 71..offset + 75].copy_from_slice(&catalog.to_le_bytes());
        }

        if let Some(lba) = terminator_lba {
            write_header(&mut data, lba as usize * SECTOR, 255);
        }

        for (idx, dir) in self.dirs.iter().enumerate() {
            let mut offset = dir_lbas[idx] as usize * SECTOR;
            offset += write_record(&mut data, offset, dir_lbas[idx], dir_sizes[idx], FLAG_DIRECTORY, &[0x00]);
            offset += write_record(
                &mut data,
                offset,
                dir_lbas[dir.parent],
                dir_sizes[dir.parent],
                FLAG_DIRECTORY,
                &[0x01],
            );

            let mut files = file_lbas[idx].iter();
            for entry in &dir.entries {
                let name = entry.name.as_bytes();
                offset += match &entry.kind {
                    EntryKind::Dir(child) => write_record(
                        &mut data,
                        offset,
                        dir_lbas[*child],
                        dir_sizes[*child],
                        FLAG_DIRECTORY,
                        name,
                    ),
                    EntryKind::File { content, flags } => {
                        let lba = *files.next().expect("allocated file sector");
                        let start = lba as usize * SECTOR;
                        if !content.is_empty() {
                            data[start..start + content.len()].copy_from_slice(content);
                        }
                        write_record(&mut data, offset, lba, content.len() as u32, *flags, name)
                    }
                };
            }
        }

        if !self.terminator {
            data.truncate(descriptors_end as usize * SECTOR);
        }
        data
    }
}

/// Bytes a record with this name occupies (identifier padded to even length)
pub fn record_len(name: &str) -> usize {
    let len = 33 + name.len();
    len + len % 2
}

fn write_header(data: &mut [u8], offset: usize, kind: u8) {
    data[offset] = kind;
    data[offset + 1..offset + 6].copy_from_slice(b"CD001");
    data[offset + 6] = 1;
}

fn write_padded(dst: &mut [u8], value: &str) {
    dst.fill(b' ');
    dst[..value.len()].copy_from_slice(value.as_bytes());
}

pub fn write_both_endian_u32(dst: &mut [u8], value: u32) {
    dst[0..4].copy_from_slice(&value.to_le_bytes());
    dst[4..8].copy_from_slice(&value.to_be_bytes());
}

pub fn write_both_endian_u16(dst: &mut [u8], value: u16) {
    dst[0..2].copy_from_slice(&value.to_le_bytes());
    dst[2..4].copy_from_slice(&value.to_be_bytes());
}

/// Write one directory record, returning its length
fn write_record(data: &mut [u8], start: usize, lba: u32, size: u32, flags: u8, name: &[u8]) -> usize {
    let entry_len = 33 + name.len() + (33 + name.len()) % 2;

    data[start] = entry_len as u8;
    data[start + 1] = 0; // Ext attr len
    write_both_endian_u32(&mut data[start + 2..], lba);
    write_both_endian_u32(&mut data[start + 10..], size);
    data[start + 18..start + 25].copy_from_slice(&[124, 4, 25, 13, 37, 0, 0]);
    data[start + 25] = flags;
    write_both_endian_u16(&mut data[start + 28..], 1);
    data[start + 32] = name.len() as u8;
    data[start + 33..start + 33 + name.len()].copy_from_slice(name);

    entry_len
}
