//! Member lookup.

use std::io::{Read, Seek};

use crate::{Error, Result};

use super::{Archive, Member};

impl<R: Read + Seek> Archive<R> {
    /// Returns all member names in archive order.
    pub fn member_names(&mut self) -> Result<Vec<String>> {
        self.members().map(|m| m.map(|m| m.name)).collect()
    }

    /// Returns the first member named `name`, without reading its payload.
    pub fn find(&mut self, name: &str) -> Result<Option<Member>> {
        for member in self.members() {
            let member = member?;
            if member.name == name {
                return Ok(Some(member));
            }
        }
        Ok(None)
    }

    /// Reads the payload of the first member named `name` into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MemberNotFound`] if no member has that name.
    pub fn read_member(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut members = self.members();
        while let Some(member) = members.next() {
            let member = member?;
            if member.name == name {
                let mut data = Vec::with_capacity(member.size.min(1 << 20) as usize);
                members.read_payload(&member, &mut data)?;
                return Ok(data);
            }
        }
        Err(Error::MemberNotFound {
            name: name.to_string(),
        })
    }
}
