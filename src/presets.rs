//! Mainnet token presets.
//!
//! Token addresses, decimals and the ordered whale lists used to fund
//! accounts on an Ethereum mainnet fork. List order is draw priority.

use alloy::primitives::{address, Address};

use crate::types::HolderList;

/// A token with a known whale list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPreset {
    pub symbol: &'static str,
    pub address: Address,
    pub decimals: u8,
    pub whales: &'static [Address],
}

impl TokenPreset {
    /// Look up a preset by symbol, case-insensitively.
    pub fn by_symbol(symbol: &str) -> Option<&'static TokenPreset> {
        PRESETS
            .iter()
            .find(|p| p.symbol.eq_ignore_ascii_case(symbol))
    }

    pub fn holders(&self) -> HolderList {
        HolderList::from(self.whales)
    }
}

pub const USDC: TokenPreset = TokenPreset {
    symbol: "USDC",
    address: address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48"),
    decimals: 6,
    whales: &USDC_WHALES,
};

pub const WBTC: TokenPreset = TokenPreset {
    symbol: "WBTC",
    address: address!("2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599"),
    decimals: 8,
    whales: &WBTC_WHALES,
};

pub static PRESETS: [TokenPreset; 2] = [USDC, WBTC];

const USDC_WHALES: [Address; 50] = [
    address!("D6153F5af5679a75cC85D8974463545181f48772"),
    address!("47ac0Fb4F2D84898e4D9E7b4DaB3C24507a6D503"),
    address!("cEe284F754E854890e311e3280b767F80797180d"),
    address!("0A59649758aa4d66E25f08Dd01271e891fe52199"),
    address!("40ec5B33f54e0E8A33A975908C5BA1c14e5BbbDf"),
    address!("5B541d54e79052B34188db9A43F7b00ea8E2C4B1"),
    address!("AFAaDfa18D9d63d09F19a5445e29CEc601054C5e"),
    address!("28C6c06298d514Db089934071355E5743bf21d60"),
    address!("F977814e90dA44bFA03b6295A0616a897441aceC"),
    address!("D54f502e184B6B739d7D27a6410a67dc462D69c8"),
    address!("3ee18B2214AFF97000D974cf647E7C347E8fa585"),
    address!("51eDF02152EBfb338e03E30d65C15fBf06cc9ECC"),
    address!("68A99f89E475a078645f4BAC491360aFe255Dff1"),
    address!("Da9CE944a37d218c3302F6B82a094844C6ECEb17"),
    address!("99C9fc46f92E8a1c0deC1b1747d010903E884bE1"),
    address!("7713974908Be4BEd47172370115e8b1219F4A5f0"),
    address!("A9D1e08C7793af67e9d92fe308d5697FB81d3E43"),
    address!("DFd5293D8e347dFe59E90eFd55b2956a1343963d"),
    address!("88e6A0c2dDD26FEEb64F039a2c41296FcB3f5640"),
    address!("21a31Ee1afC51d94C2eFcCAa2092aD1028285549"),
    address!("7eb6c83AB7D8D9B8618c0Ed973cbEF71d1921EF2"),
    address!("5041ed759Dd4aFc3a72b8192C143F72f4724081A"),
    address!("075C8071871130116ee08e7AE095101FB4b1BFB5"),
    address!("57891966931Eb4Bb6FB81430E6cE0A03AAbDe063"),
    address!("6F4565c9D673DBDD379ABa0b13f8088d1AF3Bb0C"),
    address!("55FE002aefF02F77364de339a1292923A15844B8"),
    address!("29a6B9807b327f656082D2e8b72dD07F275793f9"),
    address!("dd442dC4D10eB9E86b8B462ed0959BEd85A48888"),
    address!("9beb4656220a6e95176a8412EE641Ea5724E91ba"),
    address!("D8D7377EB56Cf99b9f49337e88b284A0b648c69e"),
    address!("C8e04176F9adcF973eBa4b35AeFfbf495501e6b3"),
    address!("f4392E751FCE0ac172F871f2799657EDF89eaCA7"),
    address!("4D8193D235A74aA191197Edf8C5Bde5489B1Ab00"),
    address!("6aC8305620256719006C51779a0794A1911550a6"),
    address!("66d856B36E058B2D1399D15D5909D7680C2747D0"),
    address!("C3017993D708DD2c17726b08046Ff58955b6fBb3"),
    address!("ae2809B006B9305386B2b20f661355E427bc992C"),
    address!("a44DfAb175f57Ef58eAE7b8b7Ed2472640fd4610"),
    address!("73f3f1E7E422B31E3A9bf0D05c73782fE2A19188"),
    address!("C288621786e5E75d00acbbf47EE0B2705e24eD2B"),
    address!("Ae2D4617c862309A3d75A0fFB358c7a5009c673F"),
    address!("59a0f98345f54bAB245A043488ECE7FCecD7B596"),
    address!("756D64Dc5eDb56740fC617628dC832DDBCfd373c"),
    address!("78605Df79524164911C144801f41e9811B7DB73D"),
    address!("f89d7b9c864f589bbF53a82105107622B35EaA40"),
    address!("504e06927D7146210aB05CE0165DbcD7206b782F"),
    address!("C44DF5b832a734A2eEfd04F45e450FB20e4e6B62"),
    address!("Be5115b02739c3Ab3e7d9521D552122917f0B038"),
    address!("497299e27C89Ec78AA9Fc24A0f60EdE28fD511C2"),
    address!("CdC10753b8Ee96873105790EDCdD50efc4991927"),
];

const WBTC_WHALES: [Address; 50] = [
    address!("5Ee5bf7ae06D1Be5997A1A72006FE6C607eC6DE8"),
    address!("9ff58f4fFB29fA2266Ab25e75e2A8b3503311656"),
    address!("a3A7B6F88361F48403514059F1F16C8E78d60EeC"),
    address!("ccF4429DB6322D5C611ee964527D42E5d685DD6a"),
    address!("c3d688B66703497DAA19211EEdff47f25384cdc3"),
    address!("40ec5B33f54e0E8A33A975908C5BA1c14e5BbbDf"),
    address!("4197ba364AE6698015AE5c1468f54087602715b2"),
    address!("7f62f9592b823331E012D3c5DdF2A7714CfB9de2"),
    address!("BF72Da2Bd84c5170618Fbe5914B0ECA9638d5eb5"),
    address!("fA8c996e158B80D77FbD0082BB437556A65B96E0"),
    address!("6daB3bCbFb336b29d06B9C793AEF7eaA57888922"),
    address!("99C9fc46f92E8a1c0deC1b1747d010903E884bE1"),
    address!("E0438Eb3703bF871E31Ce639bd351109c88666ea"),
    address!("77134cbC06cB00b66F4c7e623D5fdBF6777635EC"),
    address!("CBCdF9626bC03E24f779434178A73a0B4bad62eD"),
    address!("A489e9daf10cEd86811d59e4D00ce1b0DEC95f5e"),
    address!("051d091B254EcdBBB4eB8E6311b7939829380b27"),
    address!("8EB8a3b98659Cce290402893d0123abb75E3ab28"),
    address!("1E227979f0b5BC691a70DEAed2e0F39a6F538FD5"),
    address!("3ee18B2214AFF97000D974cf647E7C347E8fa585"),
    address!("1Cb17a66DC606a52785f69F08F4256526aBd4943"),
    address!("4F4495243837681061C4743b74B3eEdf548D56A5"),
    address!("652356478073bA1D38b310850446d0A4C3Cad4BD"),
    address!("e74b28c2eAe8679e3cCc3a94d5d0dE83CCB84705"),
    address!("9cb4706e20A18E59a48ffa7616d700A3891e1861"),
    address!("4bb7f4c3d47C4b431cb0658F44287d52006fb506"),
    address!("693942887922785105088f04E9906D16188E9388"),
    address!("bfE5E57Fa7A851F1F404e33A57E8FC5bf182DF06"),
    address!("ADc842a26b185897aC22042c99961F854Ca4395F"),
    address!("28C6c06298d514Db089934071355E5743bf21d60"),
    address!("CFFAd3200574698b78f32232aa9D63eABD290703"),
    address!("000000000dFDe7deaF24138722987c9a6991e2D4"),
    address!("D51a44d3FaE010294C616388b506AcdA1bfAAE46"),
    address!("1d5A591EebB5BcB20F440D121e4f62e8d1689997"),
    address!("4585FE77225b41b697C938B018E2Ac67Ac5a20c0"),
    address!("33eeCc48943aAeabb5328A25ff28eb85F67945C2"),
    address!("1d0C2555A0002A54dE13749af384223691bCb4d6"),
    address!("292008a92060e038dd8C76F18346FA8bE6081717"),
    address!("f5f5B97624542D72A9E06f04804Bf81baA15e2B4"),
    address!("9Db9e0e53058C89e5B94e29621a205198648425B"),
    address!("aB7b99998206D1ccf8B13b02b7566C267F4e2313"),
    address!("CEfF51756c56CeFFCA006cD410B03FFC46dd3a58"),
    address!("32467a5fc2d72D21E8DCe990906547A2b012f382"),
    address!("C882b111A75C0c657fC507C04FbFcD2cC984F071"),
    address!("21AA30C357D4102372Be8F32F7A3104c853BBe22"),
    address!("98C3d3183C4b8A650614ad179A1a98be0a8d6B8E"),
    address!("7576Fb92972796F0d7647F46B21755466d7a3bfA"),
    address!("DFd5293D8e347dFe59E90eFd55b2956a1343963d"),
    address!("7F86Bf177Dd4F3494b841a37e810A34dD56c829B"),
    address!("5680b3FcBB64FB161adbD347BC92e8DDEDA97008"),
];
